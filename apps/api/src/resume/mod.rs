//! Resume pipeline: structured extraction, role variants and PDF export.

pub mod handlers;
pub mod mutator;
pub mod parser;
pub mod pipeline;
pub mod prompts;
