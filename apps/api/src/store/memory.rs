use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{sorted_summaries, DocumentStore, StoreError};
use crate::models::{DocumentSummary, NewDocument, ParsedResume, RenderedTemplate, ResumeVariant, UploadedDocument};

/// Process-local store. Contents are lost on restart and not shared across instances.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<Uuid, UploadedDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F, T>(&self, id: Uuid, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut UploadedDocument) -> T + Send,
    {
        let mut docs = self.docs.write().await;
        let doc = docs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        Ok(apply(doc))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(&self, upload: NewDocument) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.docs
            .write()
            .await
            .insert(id, UploadedDocument::new(id, upload));
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<UploadedDocument, StoreError> {
        self.docs
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        Ok(sorted_summaries(self.docs.read().await.values()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.docs
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn set_parsed(&self, id: Uuid, parsed: ParsedResume) -> Result<(), StoreError> {
        self.update(id, |doc| doc.parsed = Some(parsed)).await
    }

    async fn set_variants(&self, id: Uuid, variants: Vec<ResumeVariant>) -> Result<(), StoreError> {
        self.update(id, |doc| doc.variants = Some(variants)).await
    }

    async fn append_template(&self, id: Uuid, template: RenderedTemplate) -> Result<usize, StoreError> {
        self.update(id, |doc| {
            doc.templates.push(template);
            doc.templates.len()
        })
        .await
    }
}
