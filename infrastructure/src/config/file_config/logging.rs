//! Transcript configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw transcript logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write a JSONL transcript of game events
    pub transcript: bool,
    /// Transcript file; a timestamped file under the data dir when unset
    pub transcript_path: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Resolve the transcript file, or `None` when transcripts are off.
    pub fn transcript_file(&self) -> Option<PathBuf> {
        if !self.transcript {
            return None;
        }
        self.transcript_path.clone().or_else(|| {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            dirs::data_dir().map(|d| {
                d.join("noire")
                    .join("transcripts")
                    .join(format!("{}.jsonl", stamp))
            })
        })
    }
}
