//! JSON-file backed `DocumentStore`.
//!
//! The whole map `{ id: record }` lives in one file that is read and rewritten
//! wholesale on every mutation. Writes land in a temp file in the same directory
//! and are renamed over the target, so readers never see a half-written file.
//! The in-process mutex only serializes this process; separate processes sharing
//! the file still race (last writer wins).

use std::collections::HashMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use super::{sorted_summaries, DocumentStore, StoreError};
use crate::models::{DocumentSummary, NewDocument, ParsedResume, RenderedTemplate, ResumeVariant, UploadedDocument};

type UploadMap = HashMap<Uuid, UploadedDocument>;

pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("File store at {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<UploadMap, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) if raw.iter().all(u8::is_ascii_whitespace) => Ok(UploadMap::new()),
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(UploadMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, uploads: &UploadMap) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(uploads)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &json))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;
        debug!("Rewrote {} with {} documents", self.path.display(), uploads.len());
        Ok(())
    }

    /// Read-modify-write of a single record under the process-wide write lock.
    async fn update<F, T>(&self, id: Uuid, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut UploadedDocument) -> T + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut uploads = self.read_all().await?;
        let doc = uploads.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let out = apply(doc);
        self.write_all(&uploads).await?;
        Ok(out)
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn put(&self, upload: NewDocument) -> Result<Uuid, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut uploads = self.read_all().await?;
        let id = Uuid::new_v4();
        uploads.insert(id, UploadedDocument::new(id, upload));
        self.write_all(&uploads).await?;
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<UploadedDocument, StoreError> {
        self.read_all()
            .await?
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        let uploads = self.read_all().await?;
        Ok(sorted_summaries(uploads.values()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut uploads = self.read_all().await?;
        uploads.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.write_all(&uploads).await
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract_tests;

    fn scratch() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("uploads.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_then_get_is_byte_identical() {
        let (_dir, store) = scratch();
        contract_tests::put_then_get_is_byte_identical(&store).await;
    }

    #[tokio::test]
    async fn test_put_generates_distinct_ids() {
        let (_dir, store) = scratch();
        contract_tests::put_generates_distinct_ids(&store).await;
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_dir, store) = scratch();
        contract_tests::delete_then_get_is_not_found(&store).await;
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_for_writes() {
        let (_dir, store) = scratch();
        contract_tests::unknown_id_is_not_found_for_writes(&store).await;
    }

    #[tokio::test]
    async fn test_cached_stages_are_reflected_in_list() {
        let (_dir, store) = scratch();
        contract_tests::cached_stages_are_reflected_in_list(&store).await;
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let (_dir, store) = scratch();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploads.json");
        let id = FileStore::new(&path)
            .put(contract_tests::upload("jane.pdf", b"%PDF-1.7"))
            .await
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(id).await.unwrap().bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploads.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.list().await, Err(StoreError::Serialization(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_are_all_kept() {
        let (_dir, store) = scratch();
        let store = std::sync::Arc::new(store);
        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..20 {
            let store = store.clone();
            tasks.spawn(async move {
                store
                    .put(contract_tests::upload(&format!("resume-{n}.pdf"), b"%PDF-1.4"))
                    .await
                    .unwrap()
            });
        }
        let mut ids = Vec::new();
        while let Some(id) = tasks.join_next().await {
            ids.push(id.unwrap());
        }

        let listed: Vec<Uuid> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(listed.len(), 20);
        assert!(ids.iter().all(|id| listed.contains(id)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_on_one_id_are_all_kept() {
        let (_dir, store) = scratch();
        let store = std::sync::Arc::new(store);
        let id = store.put(contract_tests::upload("jane.pdf", b"%PDF-1.4")).await.unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..20 {
            let store = store.clone();
            tasks.spawn(async move {
                let template = RenderedTemplate {
                    version_index: n,
                    content: format!("<html>{n}</html>"),
                    created_at: chrono::Utc::now(),
                };
                store.append_template(id, template).await.unwrap()
            });
        }
        let mut counts = Vec::new();
        while let Some(count) = tasks.join_next().await {
            counts.push(count.unwrap());
        }
        counts.sort_unstable();

        assert_eq!(counts, (1..=20).collect::<Vec<usize>>());
        assert_eq!(store.get(id).await.unwrap().templates.len(), 20);
    }
}
