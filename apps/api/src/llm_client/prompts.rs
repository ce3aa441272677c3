// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prompt that rewrites existing resume content.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY facts present in the input. \
    Do NOT invent employers, titles, dates, metrics, skills or projects. \
    You may reorder, re-emphasize, shorten or remove content, never add it.";
