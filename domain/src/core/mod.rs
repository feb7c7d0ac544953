//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question put to a suspect
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
