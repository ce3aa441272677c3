//! Test doubles for the model and extractor seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::extraction::{ExtractionError, TextExtractor};
use crate::llm_client::{ChatModel, ChatRequest, LlmError};

/// Replays queued responses in order and records every prompt it receives.
/// Runs dry with `EmptyContent`.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<(String, f32)>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = Self::default();
        for response in responses {
            model.push(Ok(response.into()));
        }
        model
    }

    pub fn failing(err: LlmError) -> Self {
        let model = Self::default();
        model.push(Err(err));
        model
    }

    pub fn push(&self, response: Result<String, LlmError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The last user prompt and its temperature.
    pub fn last_prompt(&self) -> Option<(String, f32)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((request.prompt.to_string(), request.temperature));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Returns the same text for any input.
pub struct FixedExtractor(pub &'static str);

#[async_trait]
impl TextExtractor for FixedExtractor {
    async fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        if self.0.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(self.0.to_string())
    }
}

pub const JANE_TEXT: &str = "Jane Doe\njane@example.com\nBackend engineer.\nAcme, Engineer, 2020-2023";

pub const JANE_JSON: &str = r#"```json
{
  "name": "Jane Doe",
  "contact": { "email": "jane@example.com", "phone": "", "linkedin": "" },
  "summary": "Backend engineer.",
  "skills": ["Rust", "Go", "Kubernetes"],
  "experience": [
    { "company": "Acme", "role": "Engineer", "dates": "2020 - 2023",
      "description": ["Cut p99 latency by 40%", "Ran on-call rotation"] }
  ],
  "education": [],
  "projects": []
}
```"#;

/// Three well-formed variants of `JANE_JSON` that add nothing.
pub const JANE_VARIANTS_JSON: &str = r#"[
  { "optimized_for": "Backend Engineer", "name": "Jane Doe",
    "contact": { "email": "jane@example.com" }, "summary": "Backend engineer.",
    "skills": ["Rust", "Go"],
    "experience": [{ "company": "Acme", "role": "Engineer", "description": ["Cut p99 latency by 40%"] }] },
  { "optimized_for": "Site Reliability Engineer", "name": "Jane Doe",
    "contact": { "email": "jane@example.com" },
    "skills": ["Kubernetes", "Go"],
    "experience": [{ "company": "Acme", "role": "Engineer", "description": ["Ran on-call rotation"] }] },
  { "optimized_for": "Platform Engineer", "name": "Jane Doe",
    "skills": ["Kubernetes", "Rust"],
    "experience": [{ "company": "Acme", "role": "Engineer", "description": [] }] }
]"#;
