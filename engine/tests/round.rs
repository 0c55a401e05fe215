use axiomancer_engine::content::{builtin_character, builtin_enemy};
use axiomancer_engine::{
    resolve_combat_round, resolve_combat_round_with, Action, Advantage, Aspect, Choice,
    CombatRules, Dice, Outcome, SkillBook,
};

#[test]
fn mind_attack_beats_heart_defend() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::new(Aspect::Mind, Action::Attack);
    let ec = Choice::new(Aspect::Heart, Action::Defend);
    let mut dice = Dice::from_scripted(vec![0.5, 0.5]);

    let result = resolve_combat_round(&player, &enemy, &pc, &ec, &mut dice, &CombatRules::default());

    assert_eq!(result.advantage, Advantage::Player);
    // floor(12 * 0.8 + 5) = 14, x1.5 = 21, minus floor(6 * 0.2) = 20
    assert_eq!(result.damage.to_enemy, 20);
    // floor(6 * 0.4 + 2.5) = 4, minus floor(10 * 0.2) = 2
    assert_eq!(result.damage.to_player, 2);
    assert_eq!(result.winner, Outcome::Player);
}

#[test]
fn effects_narrate_choices_then_advantage() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::new(Aspect::Mind, Action::Attack);
    let ec = Choice::new(Aspect::Heart, Action::Defend);
    let mut dice = Dice::from_seed(1);

    let result = resolve_combat_round(&player, &enemy, &pc, &ec, &mut dice, &CombatRules::default());

    insta::assert_snapshot!(result.effects.join("\n"), @r"
    Socrates chose MIND and used ATTACK
    Philosophical Goblin chose HEART and used DEFEND
    MIND overcomes HEART! Socrates gains advantage!
    ");
}

#[test]
fn matching_aspects_give_no_advantage() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::new(Aspect::Body, Action::Special);
    let ec = Choice::new(Aspect::Body, Action::Attack);
    let mut dice = Dice::from_seed(11);

    let result = resolve_combat_round(&player, &enemy, &pc, &ec, &mut dice, &CombatRules::default());

    assert_eq!(result.advantage, Advantage::None);
    assert_eq!(
        result.effects[2],
        "Both combatants chose the same philosophical aspect - no advantage gained."
    );
}

#[test]
fn enemy_advantage_is_reported_from_enemy_side() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::new(Aspect::Heart, Action::Attack);
    let ec = Choice::new(Aspect::Mind, Action::Attack);
    let mut dice = Dice::from_seed(5);

    let result = resolve_combat_round(&player, &enemy, &pc, &ec, &mut dice, &CombatRules::default());

    assert_eq!(result.advantage, Advantage::Enemy);
    assert_eq!(
        result.effects[2],
        "MIND overcomes HEART! Philosophical Goblin gains advantage!"
    );
}

#[test]
fn same_seed_same_result() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::new(Aspect::Heart, Action::Special);
    let ec = Choice::new(Aspect::Mind, Action::Defend);
    let rules = CombatRules::default();

    let a = resolve_combat_round(&player, &enemy, &pc, &ec, &mut Dice::from_seed(99), &rules);
    let b = resolve_combat_round(&player, &enemy, &pc, &ec, &mut Dice::from_seed(99), &rules);

    assert_eq!(a, b);
    assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
}

#[test]
fn choices_are_echoed_untouched() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::skill(Aspect::Body, "hasty_generalization");
    let ec = Choice::new(Aspect::Heart, Action::Special);
    let mut dice = Dice::from_seed(2);

    let result = resolve_combat_round(&player, &enemy, &pc, &ec, &mut dice, &CombatRules::default());

    assert_eq!(result.player_choice, pc);
    assert_eq!(result.enemy_choice, ec);
}

#[test]
fn skills_use_the_skill_book() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let skills = SkillBook::builtin().unwrap();
    let pc = Choice::skill(Aspect::Heart, "ad_hominem");
    let ec = Choice::new(Aspect::Body, Action::Attack);
    // Only the enemy's attack draws.
    let mut dice = Dice::from_scripted(vec![0.5]);

    let result = resolve_combat_round_with(
        &player,
        &enemy,
        &pc,
        &ec,
        &mut dice,
        &CombatRules::default(),
        &skills,
    );

    assert_eq!(result.advantage, Advantage::Player);
    // 30 + floor(13 * 0.3) = 33, x1.5 = 49, minus 1
    assert_eq!(result.damage.to_enemy, 48);
    // floor(8 * 0.8 + 5) = 11, minus 2
    assert_eq!(result.damage.to_player, 9);
    assert_eq!(
        result.effects[0],
        "Socrates chose HEART and used SKILL (Ad Hominem Attack)"
    );
}

#[test]
fn unknown_skill_deals_minimum_damage() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::skill(Aspect::Heart, "no_such_skill");
    let ec = Choice::new(Aspect::Heart, Action::Attack);
    let mut dice = Dice::from_scripted(vec![0.5]);

    let result = resolve_combat_round_with(
        &player,
        &enemy,
        &pc,
        &ec,
        &mut dice,
        &CombatRules::default(),
        &SkillBook::builtin().unwrap(),
    );

    assert_eq!(result.damage.to_enemy, 1);
    assert_eq!(result.effects[0], "Socrates chose HEART and used SKILL (no_such_skill)");
}

#[test]
fn skill_casts_report_their_mana_cost() {
    let player = builtin_character("socrates").unwrap();
    let enemy = builtin_enemy("philosophical_goblin").unwrap();
    let pc = Choice::skill(Aspect::Body, "hasty_generalization");
    let ec = Choice::new(Aspect::Body, Action::Defend);
    let mut dice = Dice::from_scripted(vec![0.5]);

    let result = resolve_combat_round_with(
        &player,
        &enemy,
        &pc,
        &ec,
        &mut dice,
        &CombatRules::default(),
        &SkillBook::builtin().unwrap(),
    );

    assert_eq!(
        result.effects.last().map(String::as_str),
        Some("Hasty Generalization costs 10 mana")
    );
}

#[test]
fn ad_hominem_backfires_on_a_more_charismatic_target() {
    let mut player = builtin_character("socrates").unwrap();
    player.stats.charisma = 5;
    let mut enemy = builtin_enemy("philosophical_goblin").unwrap();
    enemy.stats.charisma = 20;
    enemy.stats.constitution = 0;
    let pc = Choice::skill(Aspect::Heart, "ad_hominem");
    let ec = Choice::new(Aspect::Heart, Action::Attack);
    let mut dice = Dice::from_scripted(vec![0.5]);

    let result = resolve_combat_round_with(
        &player,
        &enemy,
        &pc,
        &ec,
        &mut dice,
        &CombatRules::default(),
        &SkillBook::builtin().unwrap(),
    );

    assert_eq!(result.advantage, Advantage::None);
    // (30 + floor(5 * 0.3)) halved, floored, nothing mitigated
    assert_eq!(result.damage.to_enemy, 15);
    assert_eq!(
        &result.effects[3..],
        &[
            "Personal attack backfires against strong personality!".to_string(),
            "Ad Hominem Attack costs 12 mana".to_string(),
        ]
    );
}
