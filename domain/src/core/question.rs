//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question the player puts to a suspect (Value Object)
///
/// Guaranteed to contain non-whitespace text. Surrounding whitespace is
/// trimmed so the transcript stores what the player actually typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s)
            .ok_or_else(|| DomainError::InvalidQuestion("question cannot be empty".to_string()))
    }
}
