use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::{Character, Enemy, EngineError};

pub(crate) const BUILTIN_SKILLS: &str = include_str!("../content/skills.yaml");

pub fn builtin_enemies() -> HashMap<&'static str, &'static str> {
    HashMap::from([(
        "philosophical_goblin",
        include_str!("../content/enemies/philosophical_goblin.json"),
    )])
}

pub fn builtin_characters() -> HashMap<&'static str, &'static str> {
    HashMap::from([("socrates", include_str!("../content/characters/socrates.json"))])
}

pub fn builtin_enemy(id: &str) -> Result<Enemy, EngineError> {
    parse_builtin("enemy", id, builtin_enemies().get(id).copied())
}

pub fn builtin_character(id: &str) -> Result<Character, EngineError> {
    parse_builtin("character", id, builtin_characters().get(id).copied())
}

fn parse_builtin<T: DeserializeOwned>(
    kind: &'static str,
    id: &str,
    text: Option<&str>,
) -> Result<T, EngineError> {
    let text = text.ok_or_else(|| EngineError::UnknownContent {
        kind,
        id: id.to_string(),
    })?;
    serde_json::from_str(text).map_err(|e| EngineError::MalformedContent {
        kind,
        id: id.to_string(),
        reason: e.to_string(),
    })
}
