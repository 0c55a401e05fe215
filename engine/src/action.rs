use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Scales with strength.
    Attack,
    /// Scales with constitution.
    Defend,
    /// Scales with intelligence.
    Special,
    /// Resolved through a [`crate::SkillBook`] entry; no stat formula of its own.
    Skill,
}

impl Action {
    /// Actions with a built-in damage formula, the ones the enemy AI and random policies pick from.
    pub const BASIC: [Action; 3] = [Action::Attack, Action::Defend, Action::Special];

    pub fn label(self) -> &'static str {
        match self {
            Action::Attack => "ATTACK",
            Action::Defend => "DEFEND",
            Action::Special => "SPECIAL",
            Action::Skill => "SKILL",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Ok(Action::Attack),
            "defend" => Ok(Action::Defend),
            "special" => Ok(Action::Special),
            "skill" => Ok(Action::Skill),
            _ => Err(EngineError::UnknownAction(s.to_string())),
        }
    }
}
