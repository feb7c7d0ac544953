//! JSON file session store with atomic writes.

use noire_application::ports::session_store::{LoadOutcome, SessionStore, StoreError};
use noire_domain::Session;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Stores the session as pretty-printed JSON in a single file.
///
/// Writes go to a sibling `.tmp` file which is synced and then renamed over
/// the target, so a crash mid-save never leaves a truncated session behind.
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl SessionStore for JsonFileSessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(session)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
        }

        let tmp = self.tmp_path();
        {
            let mut file = File::create(&tmp).map_err(|e| Self::io_error(&tmp, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| Self::io_error(&tmp, e))?;
            file.sync_all().map_err(|e| Self::io_error(&tmp, e))?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| Self::io_error(&self.path, e))?;

        debug!("Saved session {} to {}", session.id(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<LoadOutcome, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LoadOutcome::Empty),
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };

        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(LoadOutcome::Empty);
        }

        match serde_json::from_str::<Session>(trimmed) {
            Ok(session) => Ok(LoadOutcome::Restored(session)),
            Err(e) => {
                warn!(
                    "Saved game at {} is unreadable, removing it: {}",
                    self.path.display(),
                    e
                );
                self.clear()?;
                Ok(LoadOutcome::Corrupt {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noire_domain::{CaseFile, Difficulty, Phase, Suspect};

    fn sample_session() -> Session {
        let characters = (0..3)
            .map(|i| Suspect {
                id: format!("c{}", i),
                name: format!("Character {}", i),
                age: 50,
                occupation: "Steward".to_string(),
                description: "Pale".to_string(),
                backstory: "Joined the crew in Cairo".to_string(),
                alibi: "On deck".to_string(),
                connections: vec![],
                is_killer: i == 2,
            })
            .collect();
        let case = CaseFile {
            setting: "A steamboat on the Nile, 1917".to_string(),
            victim: "Linnet Doyle".to_string(),
            murder_weapon: "Pistol".to_string(),
            murder_location: "Cabin 4".to_string(),
            murder_time: "Just after midnight".to_string(),
            backstory: "A honeymoon cruise".to_string(),
            belongings: None,
            characters,
        };
        Session::new("nile-1", Difficulty::Easy, case)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), LoadOutcome::Empty);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("nested/dir/session.json"));
        let mut session = sample_session();
        session.begin_investigation().unwrap();

        store.save(&session).unwrap();
        assert!(!store.tmp_path().exists());

        match store.load().unwrap() {
            LoadOutcome::Restored(restored) => {
                assert_eq!(restored, session);
                assert_eq!(restored.current_phase(), Phase::Investigation);
            }
            other => panic!("expected restored session, got {:?}", other),
        }
    }

    #[test]
    fn test_save_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));
        let mut session = sample_session();
        store.save(&session).unwrap();
        session.resolve_accusation("c2").unwrap();
        store.save(&session).unwrap();

        let restored = store.load().unwrap().into_session().unwrap();
        assert_eq!(restored.current_phase(), Phase::Won);
    }

    #[test]
    fn test_null_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "null\n").unwrap();
        let store = JsonFileSessionStore::new(&path);
        assert_eq!(store.load().unwrap(), LoadOutcome::Empty);
    }

    #[test]
    fn test_corrupt_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"id\": \"half a sess").unwrap();
        let store = JsonFileSessionStore::new(&path);

        assert!(matches!(store.load().unwrap(), LoadOutcome::Corrupt { .. }));
        assert!(!path.exists());
        assert_eq!(store.load().unwrap(), LoadOutcome::Empty);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));
        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), LoadOutcome::Empty);
    }
}
