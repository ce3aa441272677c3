//! Text Extractor: turns uploaded document bytes into plain text for the parser.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document could not be read: {0}")]
    Malformed(String),

    #[error("document contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Extracts text runs from PDF bytes with `pdf-extract`. No OCR: scanned
/// image-only PDFs come back as `NoText`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let owned = bytes.to_vec();
        // pdf-extract is CPU-bound and panics on some malformed inputs; a panic
        // surfaces here as a JoinError instead of taking the worker down.
        let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&owned))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        let text = normalize_text(&raw);
        if text.is_empty() {
            return Err(ExtractionError::NoText);
        }
        debug!("Extracted {} chars of text", text.len());
        Ok(text)
    }
}

/// Trims trailing whitespace per line and collapses runs of blank lines to one.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;
    for line in raw.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            out.push_str(line);
            out.push('\n');
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let raw = "\n\n  Jane Doe  \n\n\n\nEngineer\t\n";
        assert_eq!(normalize_text(raw), "Jane Doe\n\nEngineer");
    }

    #[test]
    fn test_normalize_whitespace_only_is_empty() {
        assert_eq!(normalize_text(" \n\t\n "), "");
    }

    #[test]
    fn test_normalize_keeps_leading_indent_inside_text() {
        assert_eq!(normalize_text("A\n  - b"), "A\n  - b");
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_fail_extraction() {
        let result = PdfTextExtractor.extract(b"definitely not a pdf").await;
        assert!(matches!(
            result,
            Err(ExtractionError::Malformed(_)) | Err(ExtractionError::Task(_))
        ));
    }
}
