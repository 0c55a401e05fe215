use serde::{Deserialize, Serialize};

use crate::Aspect;

/// The six numeric attributes every combatant exposes to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: u32,
    pub constitution: u32,
    pub wisdom: u32,
    pub intelligence: u32,
    pub dexterity: u32,
    pub charisma: u32,
}

impl Stats {
    /// Stat that feeds skills of the given aspect.
    pub fn for_aspect(&self, aspect: Aspect) -> u32 {
        match aspect {
            Aspect::Body => self.strength,
            Aspect::Mind => self.intelligence,
            Aspect::Heart => self.charisma,
        }
    }
}

/// Read-only view the engine needs of a fighter. It never mutates one.
pub trait Combatant {
    fn name(&self) -> &str;

    fn stats(&self) -> &Stats;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub stats: Stats,
    /// Ids of known skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    pub max_health: u32,
    pub stats: Stats,
    #[serde(default)]
    pub description: String,
}

impl Character {
    pub fn knows_skill(&self, id: &str) -> bool {
        self.skills.iter().any(|s| s == id)
    }
}

fn default_level() -> u32 {
    1
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}
