//! Interactive game loop

mod command;
mod repl;

pub use command::GameCommand;
pub use repl::{GameRepl, StartMode};
