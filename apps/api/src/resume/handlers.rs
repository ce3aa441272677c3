use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ParsedResume, ResumeVariant};
use crate::resume::pipeline::{self, RenderedPdf};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MutateResponse {
    pub count: usize,
    pub variants: Vec<ResumeVariant>,
}

/// POST /api/v1/documents/:id/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ParsedResume>, AppError> {
    let parsed = pipeline::parse_document(
        id,
        state.store.as_ref(),
        state.extractor.as_ref(),
        state.llm.as_ref(),
    )
    .await?;
    Ok(Json(parsed))
}

/// POST /api/v1/documents/:id/mutate
pub async fn handle_mutate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MutateResponse>, AppError> {
    let variants = pipeline::mutate_document(id, state.store.as_ref(), state.llm.as_ref()).await?;
    Ok(Json(MutateResponse {
        count: variants.len(),
        variants,
    }))
}

/// GET /api/v1/documents/:id/variants/:index/pdf
pub async fn handle_render_variant(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Response, AppError> {
    let pdf = pipeline::render_variant(id, index, state.store.as_ref(), &state.page_config).await?;
    Ok(pdf_response(pdf))
}

/// POST /api/v1/resumes/render
/// Exports a resume assembled client-side (e.g. in the builder form).
pub async fn handle_render_resume(
    State(state): State<AppState>,
    Json(resume): Json<ParsedResume>,
) -> Result<Response, AppError> {
    let pdf = pipeline::render_resume(resume, &state.page_config).await?;
    Ok(pdf_response(pdf))
}

fn pdf_response(pdf: RenderedPdf) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", pdf.filename),
            ),
        ],
        pdf.bytes,
    )
        .into_response()
}
