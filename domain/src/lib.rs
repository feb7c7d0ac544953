//! Domain layer for noire
//!
//! This crate contains the core game entities, value objects and policies.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`Session`] is one playthrough of a generated murder mystery. It owns
//! the immutable [`CaseFile`] (setting, victim, suspect roster) and the
//! mutable parts of play:
//!
//! - **Phase**: `intro → investigation → won | lost`
//! - **Conversation threads**: append-only dialogue per suspect
//!
//! ## Policies
//!
//! - **Difficulty**: maps easy / medium / hard to 3 / 5 / 7 suspects
//! - **Question cap**: the number of questions the player may put to one suspect

pub mod case;
pub mod core;
pub mod policy;
pub mod session;

// Re-export commonly used types
pub use case::entities::{CaseFile, Suspect};
pub use core::{error::DomainError, question::Question};
pub use policy::{
    difficulty::{Difficulty, DifficultyConfig},
    question_limit::{DEFAULT_QUESTION_LIMIT, QuestionPolicy},
};
pub use session::{
    conversation::{ConversationThread, DialogueTurn, Message, Speaker},
    entities::Session,
    phase::Phase,
    summary::InvestigationSummary,
};
