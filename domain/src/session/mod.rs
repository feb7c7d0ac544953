//! Session domain.
//!
//! - [`entities::Session`]: the aggregate root for one playthrough
//! - [`conversation::ConversationThread`]: append-only dialogue with one suspect
//! - [`phase::Phase`]: the session state machine
//! - [`summary::InvestigationSummary`]: end-of-case statistics

pub mod conversation;
pub mod entities;
pub mod phase;
pub mod summary;
