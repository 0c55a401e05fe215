use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Aspect, DamageRules, EngineError, Stats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub aspect: Aspect,
    #[serde(default)]
    pub mana_cost: u32,
    /// Flat damage before the aspect stat bonus. Zero for purely utility skills.
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub description: String,
}

/// Skills by id, in definition order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillBook {
    skills: IndexMap<String, Skill>,
}

impl SkillBook {
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Self {
        Self {
            skills: skills.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    pub fn builtin() -> Result<Self, EngineError> {
        let list: Vec<Skill> = serde_yaml::from_str(crate::content::BUILTIN_SKILLS).map_err(|e| {
            EngineError::MalformedContent {
                kind: "skill book",
                id: "builtin".into(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::new(list))
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }
}

/// Share of an ad hominem's damage that lands on a more charismatic target.
const BACKFIRE_RATIO: f64 = 0.5;

/// Flat skill damage plus a share of the caster's stat for the skill's aspect.
pub fn skill_base_damage(skill: &Skill, caster: &Stats, rules: &DamageRules) -> u32 {
    let bonus = (caster.for_aspect(skill.aspect) as f64 * rules.skill_stat_ratio)
        .floor()
        .max(0.0) as u32;
    skill.damage.saturating_add(bonus)
}

/// Base damage and narration for one cast, before advantage and mitigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCast {
    pub base: u32,
    pub effects: Vec<String>,
}

pub fn cast_skill(skill: &Skill, caster: &Stats, target: &Stats, rules: &DamageRules) -> SkillCast {
    let mut base = skill_base_damage(skill, caster, rules);
    let mut effects = Vec::new();
    if skill.id == "ad_hominem" && target.charisma > caster.charisma {
        base = (base as f64 * BACKFIRE_RATIO).floor() as u32;
        effects.push("Personal attack backfires against strong personality!".to_string());
    }
    effects.push(format!("{} costs {} mana", skill.name, skill.mana_cost));
    SkillCast { base, effects }
}
