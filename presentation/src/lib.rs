//! Presentation layer for noire
//!
//! This crate contains CLI definitions, the interactive game loop,
//! console formatting and progress indicators.

pub mod cli;
pub mod game;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, DifficultyArg};
pub use game::{GameCommand, GameRepl, StartMode};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, Spinner};
