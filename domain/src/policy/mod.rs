//! Game policies consulted by the session controller.
//!
//! - [`difficulty::Difficulty`]: maps a level to a suspect count (case creation only)
//! - [`question_limit::QuestionPolicy`]: per-suspect question cap

pub mod difficulty;
pub mod question_limit;
