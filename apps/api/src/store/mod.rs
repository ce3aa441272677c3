//! Document Store: keyed storage for uploaded documents and their cached pipeline stages.
//!
//! `AppState` holds an `Arc<dyn DocumentStore>`, chosen at startup from config:
//! `MemoryStore` (process-local) or `FileStore` (one JSON file on disk).

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{DocumentSummary, NewDocument, ParsedResume, RenderedTemplate, ResumeVariant, UploadedDocument};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store task failed: {0}")]
    Task(String),
}

/// CRUD over uploaded documents plus the per-stage cache writes.
///
/// No per-id locking is promised: two writers to the same id race and the
/// last write wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores a new document under a fresh random id. No deduplication.
    async fn put(&self, upload: NewDocument) -> Result<Uuid, StoreError>;

    async fn get(&self, id: Uuid) -> Result<UploadedDocument, StoreError>;

    /// All documents ordered by upload time, then id.
    async fn list(&self) -> Result<Vec<DocumentSummary>, StoreError>;

    /// Removes the document and everything cached against it.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    async fn set_parsed(&self, id: Uuid, parsed: ParsedResume) -> Result<(), StoreError>;

    /// Replaces any previously cached variants.
    async fn set_variants(&self, id: Uuid, variants: Vec<ResumeVariant>) -> Result<(), StoreError>;

    /// Appends a saved template and returns the document's new template count.
    async fn append_template(&self, id: Uuid, template: RenderedTemplate) -> Result<usize, StoreError>;
}

fn sorted_summaries<'a>(docs: impl Iterator<Item = &'a UploadedDocument>) -> Vec<DocumentSummary> {
    let mut summaries: Vec<DocumentSummary> = docs.map(UploadedDocument::summary).collect();
    summaries.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.id.cmp(&b.id)));
    summaries
}

/// Behavioural checks shared by every backend's test module.
#[cfg(test)]
pub(crate) mod contract_tests {
    use chrono::Utc;

    use super::*;
    use crate::models::ResumeVariant;

    pub fn upload(name: &str, bytes: &[u8]) -> NewDocument {
        NewDocument {
            name: name.to_string(),
            media_type: "application/pdf".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    pub async fn put_then_get_is_byte_identical(store: &dyn DocumentStore) {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let id = store.put(upload("jane.pdf", &bytes)).await.unwrap();

        let doc = store.get(id).await.unwrap();
        assert_eq!(doc.bytes, bytes);
        assert_eq!(doc.name, "jane.pdf");

        let listed = store.list().await.unwrap();
        assert!(listed.iter().any(|s| s.id == id && s.size_bytes == 256));
    }

    pub async fn put_generates_distinct_ids(store: &dyn DocumentStore) {
        let a = store.put(upload("same.pdf", b"x")).await.unwrap();
        let b = store.put(upload("same.pdf", b"x")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    pub async fn delete_then_get_is_not_found(store: &dyn DocumentStore) {
        let id = store.put(upload("gone.pdf", b"x")).await.unwrap();
        store.delete(id).await.unwrap();
        assert!(matches!(store.get(id).await, Err(StoreError::NotFound(i)) if i == id));
        assert!(matches!(store.delete(id).await, Err(StoreError::NotFound(_))));
    }

    pub async fn unknown_id_is_not_found_for_writes(store: &dyn DocumentStore) {
        let id = Uuid::new_v4();
        assert!(matches!(
            store.set_parsed(id, ParsedResume::default()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.set_variants(id, vec![]).await,
            Err(StoreError::NotFound(_))
        ));
    }

    pub async fn cached_stages_are_reflected_in_list(store: &dyn DocumentStore) {
        let id = store.put(upload("jane.pdf", b"x")).await.unwrap();
        let parsed = ParsedResume {
            name: "Jane Doe".into(),
            ..ParsedResume::default()
        };
        store.set_parsed(id, parsed.clone()).await.unwrap();
        store
            .set_variants(
                id,
                vec![ResumeVariant {
                    optimized_for: "Backend Engineer".into(),
                    resume: parsed.clone(),
                }],
            )
            .await
            .unwrap();

        let count = store
            .append_template(
                id,
                RenderedTemplate {
                    version_index: 0,
                    content: "<html/>".into(),
                    created_at: Utc::now(),
                },
            )
            .await
            .unwrap();
        assert_eq!(count, 1);

        let doc = store.get(id).await.unwrap();
        assert_eq!(doc.parsed, Some(parsed));
        assert_eq!(doc.variants.map(|v| v.len()), Some(1));

        let summary = store.list().await.unwrap().into_iter().find(|s| s.id == id).unwrap();
        assert!(summary.parsed);
        assert!(summary.mutated);
        assert_eq!(summary.template_count, 1);
    }
}
