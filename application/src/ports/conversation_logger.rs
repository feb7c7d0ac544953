//! Port for structured game transcripts.
//!
//! Defines the [`ConversationLogger`] trait for recording game events
//! (case generation, questions, replies, accusations) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured game event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "case_generated", "question", "accusation").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging game events to a structured log.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write failures.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
