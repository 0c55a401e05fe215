pub mod action;
pub mod ai;
pub mod api;
pub mod aspect;
pub mod combatant;
pub mod content;
pub mod damage;
pub mod encounter;
pub mod error;
pub mod round;
pub mod rules;
pub mod skills;

pub use action::Action;
pub use ai::generate_enemy_choice;
pub use aspect::{resolve_advantage, Aspect, Outcome};
pub use combatant::{Character, Combatant, Enemy, Stats};
pub use damage::calculate_damage;
pub use encounter::{Encounter, EncounterStatus, Vitals};
pub use error::EngineError;
pub use round::{resolve_combat_round, resolve_combat_round_with, Advantage, Choice, DamageSplit, RoundResult};
pub use rules::{AiRules, CombatRules, DamageRules, StatScaling};
pub use skills::{Skill, SkillBook};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws in `[0, 1)` for jitter and AI picks.
///
/// Seeded dice are reproducible; scripted dice replay a fixed sequence
/// (cycling when exhausted) so tests can pin every draw.
pub struct Dice {
    source: Source,
}

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { values: Vec<f64>, next: usize },
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::from_entropy()) }
    }

    pub fn from_scripted(values: Vec<f64>) -> Self {
        Self { source: Source::Scripted { values, next: 0 } }
    }

    /// Next draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0.0..1.0),
            Source::Scripted { values, next } => {
                if values.is_empty() {
                    return 0.0;
                }
                let v = values[*next % values.len()];
                *next += 1;
                v.clamp(0.0, 1.0 - f64::EPSILON)
            }
        }
    }

    /// Uniform draw in `[0, upper)`.
    pub fn uniform(&mut self, upper: f64) -> f64 {
        self.unit() * upper
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64) as usize).min(len - 1)
    }
}
