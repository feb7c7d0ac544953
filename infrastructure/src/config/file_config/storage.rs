//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Where the saved game lives (default: `<data_dir>/noire/session.json`)
    pub path: Option<PathBuf>,
    /// Keep the session in memory only
    pub ephemeral: bool,
}

impl FileStorageConfig {
    /// Resolve the session file path.
    ///
    /// Returns `None` when no path is configured and the platform has no
    /// data directory.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("noire").join("session.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = FileStorageConfig {
            path: Some(PathBuf::from("/tmp/noire/save.json")),
            ephemeral: false,
        };
        assert_eq!(
            config.session_path(),
            Some(PathBuf::from("/tmp/noire/save.json"))
        );
    }

    #[test]
    fn test_default_path_ends_with_session_json() {
        if let Some(path) = FileStorageConfig::default().session_path() {
            assert!(path.ends_with("noire/session.json"));
        }
    }
}
