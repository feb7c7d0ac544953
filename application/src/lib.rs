//! Application layer for noire
//!
//! This crate contains the session controller use case, port definitions,
//! and game rules. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GameRules;
pub use ports::{
    case_provider::{CaseContentProvider, CharacterReply, ProviderError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    restart::{NoRestart, RestartHandler},
    session_store::{LoadOutcome, SessionStore, StoreError},
};
pub use use_cases::session_controller::{SessionController, SessionError, Verdict};
