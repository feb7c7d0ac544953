//! OpenAI-compatible chat-completions content provider.
//!
//! Sends one non-streaming `POST {base_url}/chat/completions` per call and
//! parses the JSON the model was asked to return.

use super::parsing::{parse_case, parse_reply};
use super::prompts::{SYSTEM_PROMPT, case_prompt, reply_prompt};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use noire_application::ports::case_provider::{
    CaseContentProvider, CharacterReply, ProviderError,
};
use noire_domain::{CaseFile, DialogueTurn, Suspect};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for a chat-completions endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ChatCompletionsConfig {
    /// Build from the `[provider]` section, resolving the API key.
    pub fn from_file_config(config: &FileProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ProviderError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Content provider backed by a hosted chat model
pub struct ChatCompletionsProvider {
    client: reqwest::Client,
    config: ChatCompletionsConfig,
}

impl ChatCompletionsProvider {
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Send a single prompt and return the assistant's text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        debug!(
            "POST {} (model: {}, prompt: {} bytes)",
            self.endpoint(),
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await.map_err(map_reqwest_error)?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!("Received {} bytes from {}", content.len(), self.config.model);
        Ok(content)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Request(error.to_string())
    }
}

#[async_trait]
impl CaseContentProvider for ChatCompletionsProvider {
    async fn generate_case(&self, suspect_count: usize) -> Result<CaseFile, ProviderError> {
        info!(
            "Requesting case with {} suspects from {}",
            suspect_count, self.config.model
        );
        let text = self.complete(&case_prompt(suspect_count)).await?;
        parse_case(&text)
    }

    async fn generate_reply(
        &self,
        suspect: &Suspect,
        question: &str,
        history: &[DialogueTurn],
    ) -> Result<CharacterReply, ProviderError> {
        let text = self
            .complete(&reply_prompt(suspect, question, history))
            .await?;
        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &str, body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let status_line = status_line.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (base_url, handle)
    }

    fn provider(base_url: String) -> ChatCompletionsProvider {
        ChatCompletionsProvider::new(ChatCompletionsConfig {
            base_url,
            model: "grok-3-mini".to_string(),
            api_key: "sk-test".to_string(),
            max_tokens: 5000,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn completion(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    fn suspect() -> Suspect {
        Suspect {
            id: "k".to_string(),
            name: "Klaus".to_string(),
            age: 47,
            occupation: "ski instructor".to_string(),
            description: "Weathered".to_string(),
            backstory: "Former champion".to_string(),
            alibi: "Waxing skis".to_string(),
            connections: vec![],
            is_killer: true,
        }
    }

    #[test]
    fn test_missing_api_key() {
        let config = FileProviderConfig {
            api_key: None,
            api_key_env: "NOIRE_TEST_DEFINITELY_UNSET".to_string(),
            ..Default::default()
        };
        let err = ChatCompletionsConfig::from_file_config(&config).unwrap_err();
        assert_eq!(
            err,
            ProviderError::MissingApiKey("NOIRE_TEST_DEFINITELY_UNSET".to_string())
        );
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = FileProviderConfig {
            api_key: Some("sk".to_string()),
            base_url: "https://api.x.ai/v1/".to_string(),
            ..Default::default()
        };
        let resolved = ChatCompletionsConfig::from_file_config(&config).unwrap();
        assert_eq!(resolved.base_url, "https://api.x.ai/v1");
        assert_eq!(resolved.timeout, Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_generate_reply_success() {
        let content = r#"{"response": "I never left the workshop.", "isLie": true}"#;
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", completion(content)).await;

        let reply = provider(base_url)
            .generate_reply(&suspect(), "Where were you?", &[])
            .await
            .unwrap();
        assert_eq!(reply, CharacterReply::new("I never left the workshop.", true));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /chat/completions"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains("\"max_tokens\":5000"));
        assert!(request.contains("Where were you?"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_error() {
        let (base_url, server) =
            serve_once("HTTP/1.1 200 OK", completion("I'd rather not answer that.")).await;

        let err = provider(base_url)
            .generate_reply(&suspect(), "Why?", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedReply(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 429 Too Many Requests",
            r#"{"error": "rate limited"}"#.to_string(),
        )
        .await;

        let err = provider(base_url).generate_case(5).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Http {
                status: 429,
                body: r#"{"error": "rate limited"}"#.to_string()
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_case_malformed() {
        let (base_url, server) =
            serve_once("HTTP/1.1 200 OK", completion("```json\n{\"setting\": 3}\n```")).await;

        let err = provider(base_url).generate_case(3).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedCase(_)));
        server.await.unwrap();
    }
}
