//! LLM Client: the single point of entry for all chat-model calls in Resumake.
//!
//! No other module talks to the model endpoint directly. Services depend on the
//! `ChatModel` trait so tests can swap in a scripted model.
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub mod openai;
pub mod prompts;

pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected output shape: {0}")]
    Shape(String),
}

impl LlmError {
    /// True when the remote call succeeded but its text could not be used.
    pub fn is_invalid_output(&self) -> bool {
        matches!(
            self,
            LlmError::EmptyContent | LlmError::Decode(_) | LlmError::Shape(_)
        )
    }
}

/// A single chat completion request: optional system message, one user turn.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub temperature: f32,
}

impl<'a> ChatRequest<'a> {
    pub fn new(prompt: &'a str, temperature: f32) -> Self {
        Self {
            system: None,
            prompt,
            temperature,
        }
    }

    pub fn with_system(mut self, system: &'a str) -> Self {
        self.system = Some(system);
        self
    }
}

/// A remote text-generation model. Returns the generated text of the first choice.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError>;
}

/// Calls the model and deserializes the text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn call_json<T: DeserializeOwned>(
    model: &dyn ChatModel,
    request: ChatRequest<'_>,
) -> Result<T, LlmError> {
    let text = model.complete(request).await?;
    decode_json(&text)
}

/// Strips code fences and decodes the remainder against `T`.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let cleaned = strip_json_fences(text);
    if cleaned.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(cleaned).map_err(|e| {
        debug!("Discarding undecodable model output: {cleaned}");
        LlmError::Decode(e)
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
