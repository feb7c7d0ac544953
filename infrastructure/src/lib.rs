//! Infrastructure layer for noire
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: content providers, session stores, the transcript
//! logger, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGameConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig, FileStorageConfig, ProviderKind,
};
pub use logging::JsonlConversationLogger;
pub use providers::{ChatCompletionsConfig, ChatCompletionsProvider, OfflineProvider};
pub use storage::{InMemorySessionStore, JsonFileSessionStore};
