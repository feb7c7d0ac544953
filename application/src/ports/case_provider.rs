//! Case content provider port
//!
//! Defines the interface to the generative service that writes the case
//! and speaks for the suspects.

use async_trait::async_trait;
use noire_domain::{CaseFile, DialogueTurn, Suspect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while generating content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed case: {0}")]
    MalformedCase(String),

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Timeout")]
    Timeout,
}

/// A suspect's in-character answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterReply {
    pub response: String,
    /// The provider's own judgement of whether the line is a lie
    #[serde(default)]
    pub is_lie: bool,
}

impl CharacterReply {
    pub fn new(response: impl Into<String>, is_lie: bool) -> Self {
        Self {
            response: response.into(),
            is_lie,
        }
    }
}

/// Generator of case content and suspect dialogue
///
/// Both calls may take arbitrarily long; the controller awaits them without
/// a timeout of its own. Implementations live in the infrastructure layer.
#[async_trait]
pub trait CaseContentProvider: Send + Sync {
    /// Produce a case with exactly `suspect_count` suspects, one of them the killer.
    async fn generate_case(&self, suspect_count: usize) -> Result<CaseFile, ProviderError>;

    /// Answer `question` in character. `history` is the full thread in
    /// insertion order, ending with the question itself.
    async fn generate_reply(
        &self,
        suspect: &Suspect,
        question: &str,
        history: &[DialogueTurn],
    ) -> Result<CharacterReply, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_deserializes_camel_case() {
        let reply: CharacterReply =
            serde_json::from_str(r#"{"response": "I was asleep.", "isLie": true}"#).unwrap();
        assert_eq!(reply, CharacterReply::new("I was asleep.", true));
    }

    #[test]
    fn test_reply_lie_flag_defaults_to_false() {
        let reply: CharacterReply = serde_json::from_str(r#"{"response": "Yes."}"#).unwrap();
        assert!(!reply.is_lie);
    }
}
