//! Domain error types

use crate::session::phase::Phase;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid case: {0}")]
    InvalidCase(String),

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Suspect not found: {0}")]
    UnknownSuspect(String),

    #[error("Question limit of {limit} reached for suspect {suspect_id}")]
    QuestionLimitReached { suspect_id: String, limit: usize },
}

impl DomainError {
    /// Check if this error came from a rejected phase change
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, DomainError::InvalidTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_display() {
        let error = DomainError::InvalidTransition {
            from: Phase::Won,
            to: Phase::Investigation,
        };
        assert_eq!(error.to_string(), "Cannot move from won to investigation");
    }

    #[test]
    fn test_is_invalid_transition_check() {
        assert!(
            DomainError::InvalidTransition {
                from: Phase::Lost,
                to: Phase::Investigation,
            }
            .is_invalid_transition()
        );
        assert!(!DomainError::InvalidQuestion("".to_string()).is_invalid_transition());
        assert!(!DomainError::InvalidCase("no killer".to_string()).is_invalid_transition());
    }
}
