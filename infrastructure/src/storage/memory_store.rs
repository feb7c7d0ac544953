//! In-memory session store.

use noire_application::ports::session_store::{LoadOutcome, SessionStore, StoreError};
use noire_domain::Session;
use std::sync::Mutex;

/// Keeps the serialized session in memory for `--ephemeral` play.
///
/// The session is stored as its JSON text, so saves and loads go through
/// the same serde round trip as the file store.
#[derive(Default)]
pub struct InMemorySessionStore {
    blob: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, StoreError> {
        self.blob
            .lock()
            .map_err(|_| StoreError::Unavailable("session store lock poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)?;
        *self.lock()? = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<LoadOutcome, StoreError> {
        let mut blob = self.lock()?;
        let Some(raw) = blob.as_deref() else {
            return Ok(LoadOutcome::Empty);
        };

        match serde_json::from_str::<Option<Session>>(raw) {
            Ok(Some(session)) => Ok(LoadOutcome::Restored(session)),
            Ok(None) => Ok(LoadOutcome::Empty),
            Err(e) => {
                *blob = None;
                Ok(LoadOutcome::Corrupt {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock()? = None;
        Ok(())
    }
}
