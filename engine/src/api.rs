use std::fs;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::content::{builtin_character, builtin_enemy};
use crate::encounter::AdvantageTally;
use crate::rules::load_rules;
use crate::{
    Action, Aspect, Character, Choice, CombatRules, Dice, Encounter, EncounterStatus, Enemy,
    SkillBook,
};

const DEFAULT_PLAYER_ID: &str = "socrates";
const DEFAULT_ENEMY_ID: &str = "philosophical_goblin";
const DEFAULT_MAX_ROUNDS: u32 = 30;

/// How the simulated player picks its moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerPolicy {
    /// Same aspect and action every round. `skill` names the skill cast
    /// when `action` is `skill`.
    Fixed {
        aspect: Aspect,
        action: Action,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        skill: Option<String>,
    },
    /// Uniform aspect and uniform basic action each round.
    #[default]
    Random,
    /// Body, Mind, Heart in turn, always attacking.
    Cycle,
    /// The character's known skills in turn, each under its own aspect.
    SkillRotation,
}

impl PlayerPolicy {
    fn choose(&self, round: u32, dice: &mut Dice, player: &Character, skills: &SkillBook) -> Choice {
        match self {
            PlayerPolicy::Fixed {
                aspect,
                action: Action::Skill,
                skill: Some(id),
            } => Choice::skill(*aspect, id.clone()),
            PlayerPolicy::Fixed { aspect, action, .. } => Choice::new(*aspect, *action),
            PlayerPolicy::Random => {
                let aspect = Aspect::ALL[dice.index(Aspect::ALL.len())];
                let action = Action::BASIC[dice.index(Action::BASIC.len())];
                Choice::new(aspect, action)
            }
            PlayerPolicy::Cycle => {
                let idx = (round.saturating_sub(1) as usize) % Aspect::ALL.len();
                Choice::new(Aspect::ALL[idx], Action::Attack)
            }
            PlayerPolicy::SkillRotation => {
                let known = &player.skills;
                let id = &known[(round.saturating_sub(1) as usize) % known.len().max(1)];
                let aspect = skills.get(id).map_or(Aspect::Body, |s| s.aspect);
                Choice::skill(aspect, id.clone())
            }
        }
    }

    /// Reject policies that could never play a legal round for `player`.
    fn check(&self, player: &Character, skills: &SkillBook) -> Result<()> {
        match self {
            PlayerPolicy::Fixed {
                action: Action::Skill,
                skill,
                ..
            } => match skill {
                None => bail!("fixed policy with the skill action needs a skill id"),
                Some(id) if !player.knows_skill(id) => {
                    bail!("{} does not know skill '{}'", player.name, id)
                }
                Some(_) => Ok(()),
            },
            PlayerPolicy::SkillRotation => {
                if player.skills.is_empty() {
                    bail!("{} knows no skills to rotate through", player.name);
                }
                if let Some(id) = player.skills.iter().find(|id| skills.get(id).is_none()) {
                    bail!("{} knows skill '{}' missing from the skill book", player.name, id);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterConfig {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub player_path: Option<String>,
    #[serde(default)]
    pub enemy_id: Option<String>,
    #[serde(default)]
    pub enemy_path: Option<String>,
    #[serde(default)]
    pub rules_path: Option<String>,
    #[serde(default)]
    pub policy: PlayerPolicy,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterResult {
    pub winner: String,
    pub rounds: u32,
    pub player_hp_end: u32,
    pub enemy_hp_end: u32,
    pub advantages: AdvantageTally,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterStats {
    pub samples: u32,
    pub player_wins: u32,
    pub enemy_wins: u32,
    pub draws: u32,
    pub avg_rounds: f64,
}

/// Everything an encounter needs, already loaded. Build one with
/// `EncounterConfig::load` or by hand when the combatants come from elsewhere.
#[derive(Debug, Clone)]
pub struct EncounterSetup {
    pub player: Character,
    pub enemy: Enemy,
    pub rules: CombatRules,
    pub skills: SkillBook,
}

impl EncounterConfig {
    pub fn load(&self) -> Result<EncounterSetup> {
        let player = match (&self.player_path, &self.player_id) {
            (Some(path), _) => load_json(path, "character")?,
            (None, id) => builtin_character(id.as_deref().unwrap_or(DEFAULT_PLAYER_ID))?,
        };
        let enemy = match (&self.enemy_path, &self.enemy_id) {
            (Some(path), _) => load_json(path, "enemy")?,
            (None, id) => builtin_enemy(id.as_deref().unwrap_or(DEFAULT_ENEMY_ID))?,
        };
        let rules = match &self.rules_path {
            Some(path) => load_rules(path)?,
            None => CombatRules::default(),
        };
        Ok(EncounterSetup {
            player,
            enemy,
            rules,
            skills: SkillBook::builtin()?,
        })
    }
}

pub fn simulate_encounter(cfg: EncounterConfig) -> Result<EncounterResult> {
    let setup = cfg.load()?;
    cfg.policy.check(&setup.player, &setup.skills)?;
    run_encounter(&cfg, &setup, cfg.seed)
}

/// Run `samples` encounters, sample `i` seeded with `seed + i`.
pub fn simulate_encounter_many(cfg: EncounterConfig, samples: u32) -> Result<EncounterStats> {
    let setup = cfg.load()?;
    simulate_setup_many(&cfg, &setup, samples)
}

/// Like `simulate_encounter_many`, for a setup the caller already loaded.
/// Only the policy, seed and round cap are read from `cfg`.
pub fn simulate_setup_many(
    cfg: &EncounterConfig,
    setup: &EncounterSetup,
    samples: u32,
) -> Result<EncounterStats> {
    cfg.policy.check(&setup.player, &setup.skills)?;
    let mut stats = EncounterStats {
        samples,
        player_wins: 0,
        enemy_wins: 0,
        draws: 0,
        avg_rounds: 0.0,
    };
    let mut total_rounds = 0u64;
    for i in 0..samples {
        let res = run_encounter(cfg, setup, cfg.seed.wrapping_add(i as u64))?;
        total_rounds += res.rounds as u64;
        match res.winner.as_str() {
            "player" => stats.player_wins += 1,
            "enemy" => stats.enemy_wins += 1,
            _ => stats.draws += 1,
        }
    }
    if samples > 0 {
        stats.avg_rounds = total_rounds as f64 / samples as f64;
    }
    Ok(stats)
}

fn run_encounter(cfg: &EncounterConfig, setup: &EncounterSetup, seed: u64) -> Result<EncounterResult> {
    let max_rounds = cfg.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS);
    let mut dice = Dice::from_seed(seed);
    let mut encounter = Encounter::new(setup.player.clone(), setup.enemy.clone());
    let mut rounds = 0u32;

    while rounds < max_rounds && encounter.status() == EncounterStatus::Ongoing {
        let choice = cfg
            .policy
            .choose(encounter.round(), &mut dice, &setup.player, &setup.skills);
        encounter
            .play_round(choice, &mut dice, &setup.rules, &setup.skills)
            .with_context(|| format!("round {} failed", encounter.round()))?;
        rounds += 1;
    }

    let winner = match encounter.status() {
        EncounterStatus::Victory => "player",
        EncounterStatus::Defeat => "enemy",
        EncounterStatus::Ongoing => "draw",
    };

    Ok(EncounterResult {
        winner: winner.to_string(),
        rounds,
        player_hp_end: encounter.player_vitals().hp,
        enemy_hp_end: encounter.enemy_vitals().hp,
        advantages: encounter.advantages(),
        log: encounter.log().to_vec(),
    })
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str, what: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {} JSON: {}", what, path))?;
    let data = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {} JSON: {}", what, path))?;
    Ok(data)
}
