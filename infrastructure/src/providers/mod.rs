//! Case content provider adapters

mod chat_completions;
mod offline;
mod parsing;
mod prompts;

pub use chat_completions::{ChatCompletionsConfig, ChatCompletionsProvider};
pub use offline::OfflineProvider;
pub use parsing::{extract_json, parse_case, parse_reply};
