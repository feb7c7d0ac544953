//! Application configuration

mod game_rules;

pub use game_rules::GameRules;
