use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::damage::{base_damage, finish_damage};
use crate::skills::cast_skill;
use crate::{resolve_advantage, Action, Aspect, CombatRules, Combatant, Dice, Outcome, SkillBook};

/// One combatant's declared move for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub aspect: Aspect,
    pub action: Action,
    /// Skill id, only meaningful with `Action::Skill`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl Choice {
    pub fn new(aspect: Aspect, action: Action) -> Self {
        Self { aspect, action, skill: None }
    }

    pub fn skill(aspect: Aspect, skill_id: impl Into<String>) -> Self {
        Self {
            aspect,
            action: Action::Skill,
            skill: Some(skill_id.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advantage {
    Player,
    Enemy,
    None,
}

impl From<Outcome> for Advantage {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Player => Advantage::Player,
            Outcome::Enemy => Advantage::Enemy,
            Outcome::Tie => Advantage::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSplit {
    pub to_player: u32,
    pub to_enemy: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub player_choice: Choice,
    pub enemy_choice: Choice,
    pub advantage: Advantage,
    /// Whoever dealt more damage this round.
    pub winner: Outcome,
    pub damage: DamageSplit,
    pub effects: Vec<String>,
}

/// Resolve one round with no skill book; `Skill` choices deal minimum damage.
pub fn resolve_combat_round(
    player: &impl Combatant,
    enemy: &impl Combatant,
    player_choice: &Choice,
    enemy_choice: &Choice,
    dice: &mut Dice,
    rules: &CombatRules,
) -> RoundResult {
    resolve_combat_round_with(
        player,
        enemy,
        player_choice,
        enemy_choice,
        dice,
        rules,
        &SkillBook::default(),
    )
}

/// Resolve one round. The player's damage draw happens before the enemy's.
pub fn resolve_combat_round_with(
    player: &impl Combatant,
    enemy: &impl Combatant,
    player_choice: &Choice,
    enemy_choice: &Choice,
    dice: &mut Dice,
    rules: &CombatRules,
    skills: &SkillBook,
) -> RoundResult {
    let outcome = resolve_advantage(player_choice.aspect, enemy_choice.aspect);
    let advantage = Advantage::from(outcome);

    let (to_enemy, player_notes) =
        strike(player, enemy, player_choice, advantage == Advantage::Player, dice, rules, skills);
    let (to_player, enemy_notes) =
        strike(enemy, player, enemy_choice, advantage == Advantage::Enemy, dice, rules, skills);

    let winner = match to_enemy.cmp(&to_player) {
        std::cmp::Ordering::Greater => Outcome::Player,
        std::cmp::Ordering::Less => Outcome::Enemy,
        std::cmp::Ordering::Equal => Outcome::Tie,
    };

    let mut effects = vec![
        describe_choice(player.name(), player_choice, skills),
        describe_choice(enemy.name(), enemy_choice, skills),
    ];
    effects.push(match outcome {
        Outcome::Player => format!(
            "{} overcomes {}! {} gains advantage!",
            player_choice.aspect,
            enemy_choice.aspect,
            player.name()
        ),
        Outcome::Enemy => format!(
            "{} overcomes {}! {} gains advantage!",
            enemy_choice.aspect,
            player_choice.aspect,
            enemy.name()
        ),
        Outcome::Tie => {
            "Both combatants chose the same philosophical aspect - no advantage gained.".to_string()
        }
    });
    effects.extend(player_notes);
    effects.extend(enemy_notes);

    debug!(?advantage, to_enemy, to_player, "round resolved");

    RoundResult {
        player_choice: player_choice.clone(),
        enemy_choice: enemy_choice.clone(),
        advantage,
        winner,
        damage: DamageSplit { to_player, to_enemy },
        effects,
    }
}

/// Damage dealt by one side plus any skill narration.
fn strike(
    attacker: &impl Combatant,
    defender: &impl Combatant,
    choice: &Choice,
    has_advantage: bool,
    dice: &mut Dice,
    rules: &CombatRules,
    skills: &SkillBook,
) -> (u32, Vec<String>) {
    let (base, notes) = match choice.action {
        Action::Skill => match choice.skill.as_deref().and_then(|id| skills.get(id)) {
            Some(skill) => {
                let cast = cast_skill(skill, attacker.stats(), defender.stats(), &rules.damage);
                (cast.base, cast.effects)
            }
            None => (0, Vec::new()),
        },
        action => (base_damage(attacker.stats(), action, dice, &rules.damage), Vec::new()),
    };
    (finish_damage(base, defender.stats(), has_advantage, &rules.damage), notes)
}

fn describe_choice(name: &str, choice: &Choice, skills: &SkillBook) -> String {
    let line = format!("{} chose {} and used {}", name, choice.aspect, choice.action);
    match (choice.action, choice.skill.as_deref()) {
        (Action::Skill, Some(id)) => {
            let skill_name = skills.get(id).map_or(id, |s| s.name.as_str());
            format!("{} ({})", line, skill_name)
        }
        _ => line,
    }
}
