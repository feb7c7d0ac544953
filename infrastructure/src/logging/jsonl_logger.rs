//! JSONL file writer for game transcript events.
//!
//! Each [`ConversationEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use noire_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger that writes one JSON object per line.
///
/// The file is opened in append mode, so a transcript survives a
/// `/reload` of the game. Flushes after every event and on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at the given path.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened; the game then runs without a transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert(
            "type".to_string(),
            Value::String(event.event_type.to_string()),
        );
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts/game.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "question",
            serde_json::json!({
                "session_id": "abc",
                "suspect_id": "s1",
                "text": "Where were you?"
            }),
        ));
        logger.log(ConversationEvent::new(
            "reply",
            serde_json::json!({
                "session_id": "abc",
                "suspect_id": "s1",
                "text": "In the garden.",
                "is_lie": true
            }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "question");
        assert_eq!(lines[0]["text"], "Where were you?");
        assert_eq!(lines[1]["type"], "reply");
        assert_eq!(lines[1]["is_lie"], true);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "session_reset",
            serde_json::json!("manual"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "session_reset");
        assert_eq!(lines[0]["data"], "manual");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.jsonl");

        for suspect in ["s1", "s2"] {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new(
                "accusation",
                serde_json::json!({ "suspect_id": suspect }),
            ));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["suspect_id"], "s2");
    }
}
