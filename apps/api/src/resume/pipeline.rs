//! Per-document pipeline stages: parse (cached), mutate (regenerated), render.
//!
//! Each stage reads the record from the store, does its work and writes the
//! result back. There is no per-id locking; concurrent stages on one id race
//! and the last write wins.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::llm_client::ChatModel;
use crate::models::{ParsedResume, ResumeVariant};
use crate::render::metrics::PageConfig;
use crate::render::{pdf_filename, render_resume_pdf};
use crate::resume::mutator::mutate_resume;
use crate::resume::parser::parse_resume;
use crate::store::DocumentStore;

/// A finished PDF plus the download name to serve it under.
#[derive(Debug)]
pub struct RenderedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Returns the cached structure if present; otherwise extracts, parses and caches.
#[instrument(skip(store, extractor, model))]
pub async fn parse_document(
    id: Uuid,
    store: &dyn DocumentStore,
    extractor: &dyn TextExtractor,
    model: &dyn ChatModel,
) -> Result<ParsedResume, AppError> {
    let doc = store.get(id).await?;
    if let Some(parsed) = doc.parsed {
        info!("Returning cached parse");
        return Ok(parsed);
    }

    let text = extractor.extract(&doc.bytes).await?;
    let parsed = parse_resume(&text, model).await?;
    store.set_parsed(id, parsed.clone()).await?;
    Ok(parsed)
}

/// Always regenerates; the new set replaces any cached variants.
#[instrument(skip(store, model))]
pub async fn mutate_document(
    id: Uuid,
    store: &dyn DocumentStore,
    model: &dyn ChatModel,
) -> Result<Vec<ResumeVariant>, AppError> {
    let doc = store.get(id).await?;
    let parsed = doc
        .parsed
        .ok_or_else(|| AppError::NotFound(format!("Document {id} has not been parsed yet")))?;

    let variants = mutate_resume(&parsed, model).await?;
    store.set_variants(id, variants.clone()).await?;
    Ok(variants)
}

#[instrument(skip(store, config))]
pub async fn render_variant(
    id: Uuid,
    index: usize,
    store: &dyn DocumentStore,
    config: &PageConfig,
) -> Result<RenderedPdf, AppError> {
    let doc = store.get(id).await?;
    let variants = doc
        .variants
        .ok_or_else(|| AppError::NotFound(format!("Document {id} has no variants yet")))?;
    let variant = variants
        .into_iter()
        .nth(index)
        .ok_or_else(|| AppError::NotFound(format!("Variant {index} not found for document {id}")))?;

    render_resume(variant.resume, config).await
}

/// Renders any structured resume, stored or hand-authored.
pub async fn render_resume(resume: ParsedResume, config: &PageConfig) -> Result<RenderedPdf, AppError> {
    let filename = pdf_filename(&resume.name);
    let bytes = render_resume_pdf(resume, config.clone()).await?;
    Ok(RenderedPdf { filename, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::metrics::default_page_config;
    use crate::store::contract_tests::upload;
    use crate::store::MemoryStore;
    use crate::test_support::{FixedExtractor, ScriptedModel, JANE_JSON, JANE_TEXT, JANE_VARIANTS_JSON};

    #[tokio::test]
    async fn test_second_parse_is_served_from_cache() {
        let store = MemoryStore::new();
        let id = store.put(upload("jane.pdf", b"%PDF-1.4")).await.unwrap();
        let model = ScriptedModel::new([JANE_JSON]);
        let extractor = FixedExtractor(JANE_TEXT);

        let first = parse_document(id, &store, &extractor, &model).await.unwrap();
        let second = parse_document(id, &store, &extractor, &model).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(model.calls(), 1);
        assert_eq!(store.get(id).await.unwrap().parsed, Some(first));
    }

    #[tokio::test]
    async fn test_failed_parse_caches_nothing() {
        let store = MemoryStore::new();
        let id = store.put(upload("jane.pdf", b"%PDF-1.4")).await.unwrap();
        let model = ScriptedModel::new(["not json at all"]);

        let err = parse_document(id, &store, &FixedExtractor(JANE_TEXT), &model)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidModelOutput(_)));
        assert!(store.get(id).await.unwrap().parsed.is_none());
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_model() {
        let store = MemoryStore::new();
        let id = store.put(upload("scan.pdf", b"%PDF-1.4")).await.unwrap();
        let model = ScriptedModel::new([JANE_JSON]);

        let err = parse_document(id, &store, &FixedExtractor(""), &model)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let model = ScriptedModel::default();
        let err = parse_document(Uuid::new_v4(), &store, &FixedExtractor(JANE_TEXT), &model)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mutate_before_parse_is_not_found() {
        let store = MemoryStore::new();
        let id = store.put(upload("jane.pdf", b"%PDF-1.4")).await.unwrap();
        let model = ScriptedModel::new([JANE_VARIANTS_JSON]);

        let err = mutate_document(id, &store, &model).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_variants_keep_previous_cache() {
        let store = MemoryStore::new();
        let id = store.put(upload("jane.pdf", b"%PDF-1.4")).await.unwrap();
        let model = ScriptedModel::new([JANE_JSON, JANE_VARIANTS_JSON, "[]"]);
        parse_document(id, &store, &FixedExtractor(JANE_TEXT), &model)
            .await
            .unwrap();
        let first = mutate_document(id, &store, &model).await.unwrap();

        let err = mutate_document(id, &store, &model).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidModelOutput(_)));
        assert_eq!(store.get(id).await.unwrap().variants, Some(first));
    }

    #[tokio::test]
    async fn test_render_without_variants_or_bad_index_is_not_found() {
        let store = MemoryStore::new();
        let config = default_page_config();
        let id = store.put(upload("jane.pdf", b"%PDF-1.4")).await.unwrap();
        let err = render_variant(id, 0, &store, &config).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let model = ScriptedModel::new([JANE_JSON, JANE_VARIANTS_JSON]);
        parse_document(id, &store, &FixedExtractor(JANE_TEXT), &model)
            .await
            .unwrap();
        mutate_document(id, &store, &model).await.unwrap();
        let err = render_variant(id, 3, &store, &config).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upload_parse_mutate_render_scenario() {
        let store = MemoryStore::new();
        let config = default_page_config();
        let model = ScriptedModel::new([JANE_JSON, JANE_VARIANTS_JSON]);
        let extractor = FixedExtractor(JANE_TEXT);

        let id = store.put(upload("jane.pdf", b"%PDF-1.4 jane")).await.unwrap();
        let parsed = parse_document(id, &store, &extractor, &model).await.unwrap();
        assert_eq!(parsed.name, "Jane Doe");

        let variants = mutate_document(id, &store, &model).await.unwrap();
        assert_eq!(variants.len(), 3);

        let pdf = render_variant(id, 0, &store, &config).await.unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert_eq!(pdf.filename, "jane_doe_resume.pdf");

        let summary = store.list().await.unwrap().remove(0);
        assert!(summary.parsed && summary.mutated);
    }
}
