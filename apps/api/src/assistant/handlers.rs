use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::bullets::{
    enhance_bullet, generate_bullets, generate_more_bullets, DEFAULT_BULLET_COUNT,
};
use crate::errors::AppError;
use crate::state::AppState;

fn default_bullet_count() -> usize {
    DEFAULT_BULLET_COUNT
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_bullet_count", alias = "numBullets")]
    pub num_bullets: usize,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub bullet: String,
}

#[derive(Debug, Deserialize)]
pub struct MoreRequest {
    #[serde(default, alias = "existingBullets")]
    pub existing_bullets: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct BulletsResponse {
    pub bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced: String,
}

/// POST /api/v1/ai/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    let bullets = generate_bullets(&req.summary, req.num_bullets, state.llm.as_ref()).await?;
    Ok(Json(BulletsResponse { bullets }))
}

/// POST /api/v1/ai/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let enhanced = enhance_bullet(&req.bullet, state.llm.as_ref()).await?;
    Ok(Json(EnhanceResponse { enhanced }))
}

/// POST /api/v1/ai/more
pub async fn handle_more(
    State(state): State<AppState>,
    Json(req): Json<MoreRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    let bullets =
        generate_more_bullets(&req.existing_bullets, &req.summary, state.llm.as_ref()).await?;
    Ok(Json(BulletsResponse { bullets }))
}
