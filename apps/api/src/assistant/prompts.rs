// Bullet assistant prompt templates. Plain-text responses, one bullet per line.

pub const GENERATE_SYSTEM: &str =
    "You are a helpful assistant who writes high-quality resume bullet points.";

pub const GENERATE_PROMPT_TEMPLATE: &str = r#"Generate {count} unique and impactful resume bullet points based on this role description:
"{summary}"

Each bullet point should:
- Start with a strong action verb
- Be concise and achievement-driven
- Include quantifiable results or metrics if possible
- Avoid vague phrases or repetition

Return one bullet point per line and nothing else."#;

pub const ENHANCE_SYSTEM: &str = "You enhance resume bullet points for better clarity and impact.";

pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Improve this resume bullet point for clarity, action, and impact:
"{bullet}"

Return only the improved bullet point on a single line."#;

pub const MORE_SYSTEM: &str = "You generate additional professional bullet points for resumes.";

pub const MORE_PROMPT_TEMPLATE: &str = r#"Based on the following role: "{summary}" and these existing bullet points:

{existing}

Generate {count} more unique bullet points that add value, avoid repetition, and emphasize accomplishments.
Return one bullet point per line and nothing else."#;
