// Resume parsing and variant-generation prompt templates.

pub const PARSE_PROMPT_TEMPLATE: &str = r#"You're a resume parser. Based on the resume text below, extract the resume info into a structured JSON object.

OUTPUT SCHEMA (return exactly this structure):
{
  "name": "Full Name",
  "contact": { "email": "", "phone": "", "linkedin": "", "github": "", "portfolio": "" },
  "summary": "string",
  "skills": ["string"],
  "experience": [
    { "company": "string", "role": "string", "location": "string", "dates": "string", "description": ["string"] }
  ],
  "education": [
    { "institution": "string", "degree": "string", "dates": "string", "major": "string", "minor": "string", "gpa": "string" }
  ],
  "projects": [
    { "title": "string", "tech": ["string"], "description": ["string"] }
  ]
}

RULES:
1. Copy facts exactly as written; leave a field empty ("" or []) when the text does not state it.
2. One "description" item per bullet point in the source.
3. Return ONLY the JSON object, nothing else, no code fences.

RESUME TEXT:
---
{raw_text}
---"#;

pub const MUTATE_PROMPT_TEMPLATE: &str = r#"You are a resume mutation engine.

Given the following parsed resume JSON:
{resume_json}

TASK: Generate exactly {variant_count} tailored versions of this resume, each adapted for a different technical job role that best matches the candidate's profile.

GUIDELINES:
1. Identify the {variant_count} most suitable, distinct roles based on the skills, experience and projects provided.
2. For each version, reorder or emphasize the skills, experience and projects relevant to that role. You may remove less relevant details.
3. {no_fabrication}
4. Keep every object in exactly the input structure, plus one extra field "optimized_for" naming the chosen role (e.g. "Backend Engineer").
5. Leave out any section or contact field that is empty in the input.

Return ONLY a JSON array of {variant_count} objects, no commentary and no code fences."#;
