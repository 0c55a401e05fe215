use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunable constants for damage and enemy behaviour. Every field has a
/// default, so a rules file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    pub damage: DamageRules,
    pub ai: AiRules,
}

/// `floor(stat * scale + U[0, jitter))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatScaling {
    pub scale: f64,
    pub jitter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageRules {
    pub attack: StatScaling,
    pub defend: StatScaling,
    pub special: StatScaling,
    pub advantage_multiplier: f64,
    /// Fraction of the defender's constitution subtracted from incoming damage.
    pub mitigation_ratio: f64,
    pub minimum_damage: u32,
    /// Fraction of the aspect stat added to a skill's flat damage.
    pub skill_stat_ratio: f64,
}

impl Default for DamageRules {
    fn default() -> Self {
        Self {
            attack: StatScaling { scale: 0.8, jitter: 10.0 },
            defend: StatScaling { scale: 0.4, jitter: 5.0 },
            special: StatScaling { scale: 0.6, jitter: 8.0 },
            advantage_multiplier: 1.5,
            mitigation_ratio: 0.2,
            minimum_damage: 1,
            skill_stat_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiRules {
    /// Strength-leaning enemies attack when the draw exceeds this, else defend.
    pub aggressive_attack_threshold: f64,
    /// Other enemies use their special when the draw exceeds this, else attack.
    pub cerebral_special_threshold: f64,
}

impl Default for AiRules {
    fn default() -> Self {
        Self {
            aggressive_attack_threshold: 0.3,
            cerebral_special_threshold: 0.4,
        }
    }
}

/// Load rules from YAML (`.yaml`/`.yml`) or JSON (anything else).
pub fn load_rules(path: impl AsRef<Path>) -> Result<CombatRules> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file: {}", path.display()))?;
    parse_rules(&text, is_yaml(path))
        .with_context(|| format!("failed to parse rules file: {}", path.display()))
}

pub fn parse_rules(text: &str, yaml: bool) -> Result<CombatRules> {
    let rules = if yaml {
        serde_yaml::from_str(text)?
    } else {
        serde_json::from_str(text)?
    };
    Ok(rules)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
