//! Per-suspect question cap.

use crate::session::conversation::ConversationThread;
use serde::{Deserialize, Serialize};

/// Default number of questions the player may put to one suspect
pub const DEFAULT_QUESTION_LIMIT: usize = 10;

/// Bounded-questions policy (Value Object)
///
/// Once a thread holds `limit` player messages it is closed to new
/// questions for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPolicy {
    limit: usize,
}

impl Default for QuestionPolicy {
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUESTION_LIMIT,
        }
    }
}

impl QuestionPolicy {
    /// A limit of zero is raised to one; a suspect can always be asked once.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Questions still available for a thread (`None` = never questioned).
    pub fn remaining(&self, thread: Option<&ConversationThread>) -> usize {
        let asked = thread.map_or(0, ConversationThread::player_question_count);
        self.limit.saturating_sub(asked)
    }

    pub fn allows_another(&self, thread: Option<&ConversationThread>) -> bool {
        self.remaining(thread) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::conversation::Message;

    fn thread_with_questions(n: usize) -> ConversationThread {
        let mut thread = ConversationThread::new("s1");
        for i in 0..n {
            thread.push(Message::player(format!("q{}", i)));
            thread.push(Message::character(format!("a{}", i), false));
        }
        thread
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(QuestionPolicy::default().limit(), 10);
    }

    #[test]
    fn test_zero_limit_is_raised() {
        assert_eq!(QuestionPolicy::new(0).limit(), 1);
    }

    #[test]
    fn test_remaining_counts_player_messages_only() {
        let policy = QuestionPolicy::new(3);
        assert_eq!(policy.remaining(None), 3);
        assert_eq!(policy.remaining(Some(&thread_with_questions(2))), 1);
        assert!(policy.allows_another(Some(&thread_with_questions(2))));
        assert!(!policy.allows_another(Some(&thread_with_questions(3))));
    }

    #[test]
    fn test_remaining_never_underflows() {
        let policy = QuestionPolicy::new(2);
        assert_eq!(policy.remaining(Some(&thread_with_questions(5))), 0);
    }
}
