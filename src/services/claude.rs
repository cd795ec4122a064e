//! Claude Review Client
//!
//! Single-shot text completion against the Anthropic Messages API. The
//! `CompletionClient` trait is what the pipeline holds; tests substitute
//! a canned implementation.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Errors from the review-service collaborator. Fatal to the current run.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Review service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Review service API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Review service returned no text content")]
    MissingText,
}

/// Single-shot completion call: prompt in, reply text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Anthropic Messages API implementation of `CompletionClient`.
pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_API_BASE.to_string(),
            model,
            max_tokens,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl CompletionClient for ClaudeClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        });

        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting review completion");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply = response.json::<Value>().await?;
        extract_text(&reply).ok_or(CompletionError::MissingText)
    }
}

/// Pull the first text content block out of a Messages API reply.
fn extract_text(reply: &Value) -> Option<String> {
    reply["content"]
        .as_array()?
        .iter()
        .find(|block| block["type"].as_str() == Some("text"))
        .and_then(|block| block["text"].as_str())
        .map(str::to_owned)
}
