use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown aspect '{0}' (expected body, mind or heart)")]
    UnknownAspect(String),

    #[error("unknown action '{0}' (expected attack, defend, special or skill)")]
    UnknownAction(String),

    #[error("unknown {kind} '{id}'")]
    UnknownContent { kind: &'static str, id: String },

    #[error("built-in {kind} '{id}' is malformed: {reason}")]
    MalformedContent {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("{character} does not know skill '{skill}'")]
    SkillNotKnown { character: String, skill: String },

    #[error("a skill action needs a skill id")]
    MissingSkill,

    #[error("encounter already ended after round {round}")]
    EncounterOver { round: u32 },
}
