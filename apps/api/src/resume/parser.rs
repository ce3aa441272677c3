//! Structured extraction: resume plain text → `ParsedResume` via the chat model.

use tracing::info;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{call_json, ChatModel, ChatRequest, LlmError};
use crate::models::ParsedResume;
use crate::resume::prompts::PARSE_PROMPT_TEMPLATE;

pub const PARSE_TEMPERATURE: f32 = 0.3;

/// Stateless; callers cache the result.
pub async fn parse_resume(text: &str, model: &dyn ChatModel) -> Result<ParsedResume, LlmError> {
    let prompt = PARSE_PROMPT_TEMPLATE.replace("{raw_text}", text);
    let request = ChatRequest::new(&prompt, PARSE_TEMPERATURE).with_system(JSON_ONLY_SYSTEM);
    let parsed: ParsedResume = call_json(model, request).await?;
    info!(
        "Parsed resume: {} experience, {} education, {} projects",
        parsed.experience.len(),
        parsed.education.len(),
        parsed.projects.len()
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedModel, JANE_JSON, JANE_TEXT};

    #[tokio::test]
    async fn test_parse_fenced_response() {
        let model = ScriptedModel::new([JANE_JSON]);
        let parsed = parse_resume(JANE_TEXT, &model).await.unwrap();
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(parsed.contact.email, "jane@example.com");
        assert_eq!(parsed.skills, vec!["Rust", "Go", "Kubernetes"]);
        assert_eq!(parsed.experience[0].description.len(), 2);

        let (prompt, temperature) = model.last_prompt().unwrap();
        assert!(prompt.contains(JANE_TEXT));
        assert_eq!(temperature, PARSE_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_parse_accepts_lenient_shapes() {
        let model = ScriptedModel::new([r#"{
            "full_name": "Sam Lee",
            "skills": {"Languages": ["Rust"], "Tools": ["Git"]},
            "experience": [{"company": "Initech", "title": "SRE", "duration": 2021, "bullets": "Kept lights on"}]
        }"#]);
        let parsed = parse_resume("Sam Lee", &model).await.unwrap();
        assert_eq!(parsed.name, "Sam Lee");
        assert_eq!(parsed.skills, vec!["Rust", "Git"]);
        assert_eq!(parsed.experience[0].role, "SRE");
        assert_eq!(parsed.experience[0].dates, "2021");
        assert_eq!(parsed.experience[0].description, vec!["Kept lights on"]);
    }

    #[tokio::test]
    async fn test_parse_prose_is_invalid_output() {
        let model = ScriptedModel::new(["I could not find a resume in that text."]);
        let err = parse_resume("???", &model).await.unwrap_err();
        assert!(err.is_invalid_output());
    }

    #[tokio::test]
    async fn test_parse_wrong_shape_is_invalid_output() {
        let model = ScriptedModel::new([r#"{"experience": "not a list"}"#]);
        let err = parse_resume("text", &model).await.unwrap_err();
        assert!(matches!(err, LlmError::Decode(_)));
    }

    #[tokio::test]
    async fn test_parse_remote_failure_passes_through() {
        let model = ScriptedModel::failing(LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        });
        let err = parse_resume("text", &model).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }
}
