use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Philosophical aspect. Body overcomes Mind, Mind overcomes Heart, Heart overcomes Body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Body,
    Mind,
    Heart,
}

impl Aspect {
    /// Fixed iteration order; also the tie-break priority for frequency tallies.
    pub const ALL: [Aspect; 3] = [Aspect::Body, Aspect::Mind, Aspect::Heart];

    /// The aspect this one overcomes.
    pub fn beats(self) -> Aspect {
        match self {
            Aspect::Body => Aspect::Mind,
            Aspect::Mind => Aspect::Heart,
            Aspect::Heart => Aspect::Body,
        }
    }

    /// The aspect that overcomes this one.
    pub fn countered_by(self) -> Aspect {
        match self {
            Aspect::Body => Aspect::Heart,
            Aspect::Mind => Aspect::Body,
            Aspect::Heart => Aspect::Mind,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Aspect::Body => "BODY",
            Aspect::Mind => "MIND",
            Aspect::Heart => "HEART",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Aspect {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(Aspect::Body),
            "mind" => Ok(Aspect::Mind),
            "heart" => Ok(Aspect::Heart),
            _ => Err(EngineError::UnknownAspect(s.to_string())),
        }
    }
}

/// Who won the aspect comparison, seen from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Player,
    Enemy,
    Tie,
}

pub fn resolve_advantage(player: Aspect, enemy: Aspect) -> Outcome {
    if player == enemy {
        Outcome::Tie
    } else if player.beats() == enemy {
        Outcome::Player
    } else {
        Outcome::Enemy
    }
}
