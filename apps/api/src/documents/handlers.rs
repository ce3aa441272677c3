use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{DocumentSummary, NewDocument, ParsedResume, RenderedTemplate, ResumeVariant};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub name: String,
    pub media_type: String,
    pub size_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct DocumentMetadata {
    pub id: Uuid,
    pub name: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub parsed_data: Option<ParsedResume>,
    pub mutated_data: Option<Vec<ResumeVariant>>,
    pub template_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveTemplateRequest {
    #[serde(alias = "versionIndex")]
    pub version_index: usize,
    #[serde(default, alias = "html")]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SaveTemplateResponse {
    pub template_count: usize,
}

/// POST /api/v1/documents  (multipart, field `file`)
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let media_type = field
            .content_type()
            .unwrap_or(FALLBACK_MEDIA_TYPE)
            .to_string();
        // Over-limit bodies surface here as 413, other multipart faults as 400.
        let bytes: Bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".into()));
        }

        let size_bytes = bytes.len();
        let id = state
            .store
            .put(NewDocument {
                name: name.clone(),
                media_type: media_type.clone(),
                bytes: bytes.to_vec(),
            })
            .await?;
        info!("Stored upload {id}: {name} ({size_bytes} bytes)");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                id,
                name,
                media_type,
                size_bytes,
            }),
        ));
    }
    Err(AppError::Validation(format!(
        "No file received; expected multipart field '{FILE_FIELD}'"
    )))
}

/// GET /api/v1/documents
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentSummary>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/v1/documents/:id
pub async fn handle_metadata(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentMetadata>, AppError> {
    let doc = state.store.get(id).await?;
    Ok(Json(DocumentMetadata {
        id: doc.id,
        name: doc.name,
        media_type: doc.media_type,
        uploaded_at: doc.uploaded_at,
        parsed_data: doc.parsed,
        mutated_data: doc.variants,
        template_count: doc.templates.len(),
    }))
}

/// GET /api/v1/documents/:id/file
pub async fn handle_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let doc = state.store.get(id).await?;
    let disposition = format!("inline; filename=\"{}\"", header_safe(&doc.name));
    Ok((
        [
            (header::CONTENT_TYPE, doc.media_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.bytes,
    )
        .into_response())
}

/// DELETE /api/v1/documents/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    info!("Deleted document {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/templates
pub async fn handle_save_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveTemplateRequest>,
) -> Result<(StatusCode, Json<SaveTemplateResponse>), AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("content is required".into()));
    }
    let template_count = state
        .store
        .append_template(
            id,
            RenderedTemplate {
                version_index: req.version_index,
                content: req.content,
                created_at: Utc::now(),
            },
        )
        .await?;
    info!("Saved template for {id} (version {}), total {template_count}", req.version_index);
    Ok((StatusCode::CREATED, Json(SaveTemplateResponse { template_count })))
}

/// Keeps printable ASCII minus `"` and `\` so the name fits in a quoted header value.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
