pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::documents::handlers as documents;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route(
            "/api/v1/documents",
            post(documents::handle_upload).get(documents::handle_list),
        )
        .route(
            "/api/v1/documents/:id",
            get(documents::handle_metadata).delete(documents::handle_delete),
        )
        .route("/api/v1/documents/:id/file", get(documents::handle_file))
        .route(
            "/api/v1/documents/:id/templates",
            post(documents::handle_save_template),
        )
        // Resume pipeline
        .route("/api/v1/documents/:id/parse", post(resume::handle_parse))
        .route("/api/v1/documents/:id/mutate", post(resume::handle_mutate))
        .route(
            "/api/v1/documents/:id/variants/:index/pdf",
            get(resume::handle_render_variant),
        )
        .route("/api/v1/resumes/render", post(resume::handle_render_resume))
        // Bullet assistant
        .route("/api/v1/ai/generate", post(assistant::handle_generate))
        .route("/api/v1/ai/enhance", post(assistant::handle_enhance))
        .route("/api/v1/ai/more", post(assistant::handle_more))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
