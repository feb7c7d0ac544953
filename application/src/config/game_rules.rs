//! Game rules enforced by the session controller.

use noire_domain::{Difficulty, QuestionPolicy};

/// Static rules the session controller enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameRules {
    /// Per-suspect question cap
    pub question_policy: QuestionPolicy,
    /// Used when `start_new_game` is called without a difficulty
    pub default_difficulty: Difficulty,
}

impl GameRules {
    pub fn with_question_limit(mut self, limit: usize) -> Self {
        self.question_policy = QuestionPolicy::new(limit);
        self
    }

    pub fn with_default_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.default_difficulty = difficulty;
        self
    }
}
