use axiomancer_engine::ai::{aspect_frequencies, most_frequent_aspect};
use axiomancer_engine::content::builtin_enemy;
use axiomancer_engine::{generate_enemy_choice, Action, AiRules, Aspect, Choice, Dice, Enemy, Stats};

fn brute() -> Enemy {
    Enemy {
        id: "brute".into(),
        name: "Brute".into(),
        level: 1,
        max_health: 40,
        stats: Stats {
            strength: 15,
            intelligence: 5,
            ..Stats::default()
        },
        description: String::new(),
    }
}

fn history(aspects: &[Aspect]) -> Vec<Choice> {
    aspects.iter().map(|&a| Choice::new(a, Action::Attack)).collect()
}

#[test]
fn empty_history_is_roughly_uniform() {
    let goblin = builtin_enemy("philosophical_goblin").unwrap();
    let rules = AiRules::default();
    let mut dice = Dice::from_seed(7);
    let mut counts = [0u32; 3];
    let samples = 10_000;
    for _ in 0..samples {
        let choice = generate_enemy_choice(&goblin, &[], &mut dice, &rules);
        let idx = Aspect::ALL.iter().position(|&a| a == choice.aspect).unwrap();
        counts[idx] += 1;
    }
    let expected = samples as f64 / 3.0;
    let chi2: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    // df = 2, p = 0.001
    assert!(chi2 < 13.82, "counts {:?} chi2 {}", counts, chi2);
}

#[test]
fn all_body_history_is_countered_by_heart() {
    let goblin = builtin_enemy("philosophical_goblin").unwrap();
    let rules = AiRules::default();
    let hist = history(&[Aspect::Body, Aspect::Body, Aspect::Body]);
    for seed in 0..50 {
        let mut dice = Dice::from_seed(seed);
        let choice = generate_enemy_choice(&goblin, &hist, &mut dice, &rules);
        assert_eq!(choice.aspect, Aspect::Heart);
    }
}

#[test]
fn most_frequent_wins_over_recent() {
    let hist = history(&[Aspect::Mind, Aspect::Mind, Aspect::Heart]);
    assert_eq!(most_frequent_aspect(&hist), Some(Aspect::Mind));
    let mut dice = Dice::from_scripted(vec![0.9]);
    let choice = generate_enemy_choice(&brute(), &hist, &mut dice, &AiRules::default());
    assert_eq!(choice.aspect, Aspect::Body);
}

#[test]
fn ties_follow_body_mind_heart_priority() {
    assert_eq!(most_frequent_aspect(&[]), None);
    assert_eq!(
        most_frequent_aspect(&history(&[Aspect::Heart, Aspect::Mind])),
        Some(Aspect::Mind)
    );
    assert_eq!(
        most_frequent_aspect(&history(&[Aspect::Heart, Aspect::Body])),
        Some(Aspect::Body)
    );
    assert_eq!(
        most_frequent_aspect(&history(&[Aspect::Heart, Aspect::Mind, Aspect::Body])),
        Some(Aspect::Body)
    );
}

#[test]
fn frequencies_list_every_aspect_in_order() {
    let freq = aspect_frequencies(&history(&[Aspect::Heart, Aspect::Heart]));
    let pairs: Vec<_> = freq.into_iter().collect();
    assert_eq!(
        pairs,
        vec![(Aspect::Body, 0), (Aspect::Mind, 0), (Aspect::Heart, 2)]
    );
}

#[test]
fn strong_enemies_attack_or_defend() {
    let rules = AiRules::default();
    let hist = history(&[Aspect::Body]);

    let mut dice = Dice::from_scripted(vec![0.31]);
    assert_eq!(generate_enemy_choice(&brute(), &hist, &mut dice, &rules).action, Action::Attack);

    let mut dice = Dice::from_scripted(vec![0.3]);
    assert_eq!(generate_enemy_choice(&brute(), &hist, &mut dice, &rules).action, Action::Defend);
}

#[test]
fn clever_enemies_use_special_or_attack() {
    // Goblin: strength 8, intelligence 10
    let goblin = builtin_enemy("philosophical_goblin").unwrap();
    let rules = AiRules::default();
    let hist = history(&[Aspect::Body]);

    let mut dice = Dice::from_scripted(vec![0.41]);
    assert_eq!(generate_enemy_choice(&goblin, &hist, &mut dice, &rules).action, Action::Special);

    let mut dice = Dice::from_scripted(vec![0.4]);
    assert_eq!(generate_enemy_choice(&goblin, &hist, &mut dice, &rules).action, Action::Attack);
}

#[test]
fn empty_history_draws_aspect_then_action() {
    let goblin = builtin_enemy("philosophical_goblin").unwrap();
    let rules = AiRules::default();

    let mut dice = Dice::from_scripted(vec![0.0, 0.9]);
    assert_eq!(
        generate_enemy_choice(&goblin, &[], &mut dice, &rules),
        Choice::new(Aspect::Body, Action::Special)
    );

    let mut dice = Dice::from_scripted(vec![0.99, 0.1]);
    assert_eq!(
        generate_enemy_choice(&goblin, &[], &mut dice, &rules),
        Choice::new(Aspect::Heart, Action::Attack)
    );
}

#[test]
fn enemy_never_picks_skill() {
    let goblin = builtin_enemy("philosophical_goblin").unwrap();
    let mut dice = Dice::from_seed(3);
    for _ in 0..500 {
        let choice = generate_enemy_choice(&goblin, &[], &mut dice, &AiRules::default());
        assert_ne!(choice.action, Action::Skill);
        assert!(choice.skill.is_none());
    }
}
