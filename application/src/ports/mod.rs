//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod case_provider;
pub mod conversation_logger;
pub mod restart;
pub mod session_store;
