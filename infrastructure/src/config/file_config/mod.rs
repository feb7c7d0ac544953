//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod game;
mod logging;
mod output;
mod provider;
mod storage;

pub use game::FileGameConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::{FileProviderConfig, ProviderKind};
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("game.question_limit must be at least 1")]
    ZeroQuestionLimit,

    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.model cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Difficulty and question cap
    pub game: FileGameConfig,
    /// Content provider selection and API settings
    pub provider: FileProviderConfig,
    /// Saved-game location
    pub storage: FileStorageConfig,
    /// JSONL transcript settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.game.question_limit == 0 {
            return Err(ConfigValidationError::ZeroQuestionLimit);
        }

        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        Ok(())
    }
}
