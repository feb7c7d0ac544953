//! Configuration file loading for noire
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NOIRE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./noire.toml` or `./.noire.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/noire/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGameConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, FileStorageConfig, ProviderKind,
};
pub use loader::ConfigLoader;
