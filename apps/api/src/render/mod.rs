//! Renderer: structured resume → PDF bytes.

pub mod layout;
pub mod metrics;
pub mod pdf;

use thiserror::Error;
use tracing::debug;

use crate::models::ParsedResume;
use metrics::PageConfig;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Lays out and paints `resume` off the async runtime.
pub async fn render_resume_pdf(resume: ParsedResume, config: PageConfig) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || render_blocking(&resume, &config))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

fn render_blocking(resume: &ParsedResume, config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let blocks = layout::layout_resume(resume);
    let pages = layout::paginate(&blocks, config);
    let bytes = pdf::paint(&resume.name, &pages, config)?;
    debug!(
        "Rendered {} blocks over {} page(s), {} bytes",
        blocks.len(),
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// `"Jane  Doe"` → `"jane_doe_resume.pdf"`. Only ASCII alphanumerics, `_` and
/// `-` survive, so the result is always safe inside a quoted header value.
pub fn pdf_filename(name: &str) -> String {
    let stem: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if stem.trim_matches('_').is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{stem}_resume.pdf")
    }
}
