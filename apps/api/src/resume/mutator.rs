//! Variant generation: one parsed resume → `VARIANT_COUNT` role-targeted copies.
//!
//! Model output is validated before anything is returned. A wrong count, a
//! missing target role or any content the source does not have fails the whole
//! call; no partial result is kept.

use tracing::{info, warn};

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{call_json, ChatModel, ChatRequest, LlmError};
use crate::models::{ParsedResume, ResumeVariant};
use crate::resume::prompts::MUTATE_PROMPT_TEMPLATE;

pub const VARIANT_COUNT: usize = 3;
pub const MUTATE_TEMPERATURE: f32 = 0.3;

pub async fn mutate_resume(
    resume: &ParsedResume,
    model: &dyn ChatModel,
) -> Result<Vec<ResumeVariant>, LlmError> {
    let resume_json = serde_json::to_string_pretty(resume)?;
    let prompt = MUTATE_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{variant_count}", &VARIANT_COUNT.to_string())
        .replace("{resume_json}", &resume_json);
    let request = ChatRequest::new(&prompt, MUTATE_TEMPERATURE).with_system(JSON_ONLY_SYSTEM);

    let variants: Vec<ResumeVariant> = call_json(model, request).await?;
    validate_variants(resume, &variants)?;

    info!(
        "Generated variants for: {}",
        variants
            .iter()
            .map(|v| v.optimized_for.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(variants)
}

/// Rejects the batch unless every variant is labelled and adds nothing.
pub fn validate_variants(source: &ParsedResume, variants: &[ResumeVariant]) -> Result<(), LlmError> {
    if variants.len() != VARIANT_COUNT {
        return Err(LlmError::Shape(format!(
            "expected {VARIANT_COUNT} variants, got {}",
            variants.len()
        )));
    }
    for (index, variant) in variants.iter().enumerate() {
        if variant.optimized_for.trim().is_empty() {
            return Err(LlmError::Shape(format!("variant {index} has no optimized_for role")));
        }
        let introduced = variant.resume.introduced_fields(source);
        if !introduced.is_empty() {
            warn!(
                "Variant {index} ({}) introduced content absent from the source: {introduced:?}",
                variant.optimized_for
            );
            return Err(LlmError::Shape(format!(
                "variant {index} introduces {} not present in the source resume",
                introduced.join(", ")
            )));
        }
    }
    Ok(())
}
