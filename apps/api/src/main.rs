mod assistant;
mod config;
mod documents;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod render;
mod resume;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::extraction::PdfTextExtractor;
use crate::llm_client::OpenAiClient;
use crate::render::metrics::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, FileStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumake API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::File => Arc::new(FileStore::new(&config.upload_store_path)),
    };

    let llm = OpenAiClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {}, endpoint: {})", llm.model(), llm.endpoint());

    let page_config = default_page_config();
    info!(
        "Page config: {}x{} mm, {} mm margins",
        page_config.page_width_mm, page_config.page_height_mm, page_config.margin_mm
    );

    let state = AppState {
        store,
        llm: Arc::new(llm),
        extractor: Arc::new(PdfTextExtractor),
        config: config.clone(),
        page_config,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
