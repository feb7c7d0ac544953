//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Which content provider generates cases and replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat-completions endpoint
    #[default]
    Chat,
    /// Built-in procedural generator, no network
    Offline,
}

/// Raw provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub kind: ProviderKind,
    /// Base URL of the chat-completions API (without `/chat/completions`)
    pub base_url: String,
    pub model: String,
    /// Environment variable name for the API key (default: "XAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key; prefer the environment variable.
    pub api_key: Option<String>,
    /// Max tokens per completion
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Seed for the offline generator; random when unset
    pub seed: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: "https://api.x.ai/v1".to_string(),
            model: "grok-3-mini".to_string(),
            api_key_env: "XAI_API_KEY".to_string(),
            api_key: None,
            max_tokens: 5000,
            timeout_seconds: 120,
            seed: None,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: the direct value wins, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
