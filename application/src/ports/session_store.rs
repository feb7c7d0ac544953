//! Session store port
//!
//! Persists exactly one session blob for the current user/device.

use noire_domain::Session;
use thiserror::Error;

/// Errors from the underlying storage medium
///
/// Absence of data and corrupt data are not errors; see [`LoadOutcome`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result of reading the store
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing saved (or a literal `null`)
    Empty,
    /// A session was parsed successfully
    Restored(Session),
    /// Unparseable data was found and has already been cleared
    Corrupt { reason: String },
}

impl LoadOutcome {
    pub fn into_session(self) -> Option<Session> {
        match self {
            LoadOutcome::Restored(session) => Some(session),
            LoadOutcome::Empty | LoadOutcome::Corrupt { .. } => None,
        }
    }
}

/// Durable storage for the live session
///
/// Calls are synchronous: a successful `save` means the data is durable.
pub trait SessionStore: Send + Sync {
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    fn load(&self) -> Result<LoadOutcome, StoreError>;

    /// Remove the saved session. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}
