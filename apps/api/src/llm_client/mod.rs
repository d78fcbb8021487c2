//! LLM Client: the single point of entry for text generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generation API directly.
//! All LLM interactions MUST go through a `TextGenerator`.
//!
//! One attempt per call: no retry, no streaming, transport-default timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable holding the generation credential. Read on every call.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that turns an instruction into generated text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>` so handlers and the
/// reading pipeline can be exercised against in-process stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key_env: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key_env: API_KEY_ENV.to_string(),
        }
    }

    /// Reads the credential from a different environment variable
    /// (`OPENAI_API_KEY_ENV` in config).
    pub fn with_api_key_env(mut self, key: impl Into<String>) -> Self {
        self.api_key_env = key.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingCredential(self.api_key_env.clone()))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        // Checked before any network traffic.
        let api_key = self.api_key()?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = serde_json::from_str(&body)?;

        if let Some(usage) = json.get("usage") {
            debug!(
                "Generation succeeded: prompt_tokens={}, completion_tokens={}",
                usage["prompt_tokens"], usage["completion_tokens"]
            );
        }

        Ok(extract_text(&json))
    }
}

/// Pulls `choices[0].message.content` out of a completion body.
/// A body without it yields an empty string rather than an error.
fn extract_text(json: &Value) -> String {
    match json["choices"][0]["message"]["content"].as_str() {
        Some(text) => text.to_string(),
        None => {
            warn!("Generation response had no text content; continuing with empty text");
            String::new()
        }
    }
}
