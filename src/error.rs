//! Error taxonomy.
//!
//! Only [`GameError`] ever blocks a transition. Persistence and identity failures are
//! logged by the runtime and otherwise swallowed: the session keeps its in-memory high
//! score and carries on.

use thiserror::Error;

use crate::game::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The category cannot fill a choice set of the requested size.
    #[error("category '{category}' has {available} items, {required} choices requested")]
    InsufficientItems {
        category: String,
        available: usize,
        required: usize,
    },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
    /// Category and difficulty may only change before play begins.
    #[error("selection is locked while {phase:?}")]
    SelectionLocked { phase: Phase },
}

/// Score Store read/write failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("score storage unavailable")]
    Unavailable,
    #[error("score read failed: {0}")]
    Read(String),
    #[error("score write failed: {0}")]
    Write(String),
    #[error("stored score record is malformed: {0}")]
    Decode(String),
}

/// The user identity could not be established, so persistence is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("identity provider unavailable")]
    Unavailable,
    #[error("identity storage failed: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
