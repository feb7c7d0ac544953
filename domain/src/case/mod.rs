//! Case domain.
//!
//! - [`entities::CaseFile`]: generated case content and suspect roster
//! - [`entities::Suspect`]: a generated character

pub mod entities;
