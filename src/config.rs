//! Runtime configuration. Everything has a default; a JSON document may override any
//! subset of fields.

use serde::Deserialize;

use crate::catalog;
use crate::difficulty;
use crate::error::ConfigError;

/// How long the visual cue stays up; repeat cue requests are ignored meanwhile.
pub const CUE_WINDOW_MS: u32 = 1200;
/// Delay before the next round starts when pacing is automatic.
pub const AUTO_ADVANCE_MS: u32 = 1800;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cue_window_ms: u32,
    pub auto_advance_ms: u32,
    pub default_category: String,
    pub default_difficulty: String,
    /// Prefix for browser storage keys.
    pub storage_namespace: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cue_window_ms: CUE_WINDOW_MS,
            auto_advance_ms: AUTO_ADVANCE_MS,
            default_category: "shapes".to_string(),
            default_difficulty: "medium".to_string(),
            storage_namespace: "sensory-match".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cue_window_ms == 0 || self.auto_advance_ms == 0 {
            return Err(ConfigError::Invalid("timer delays must be non-zero".into()));
        }
        if catalog::category(&self.default_category).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown default category '{}'",
                self.default_category
            )));
        }
        if difficulty::difficulty(&self.default_difficulty).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown default difficulty '{}'",
                self.default_difficulty
            )));
        }
        if self.storage_namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("storage namespace is empty".into()));
        }
        Ok(())
    }
}
