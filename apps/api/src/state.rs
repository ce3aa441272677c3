use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::ChatModel;
use crate::render::metrics::PageConfig;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Memory or file backend, chosen from `STORE_BACKEND` at startup.
    pub store: Arc<dyn DocumentStore>,
    pub llm: Arc<dyn ChatModel>,
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
    /// Page geometry for every PDF render.
    pub page_config: PageConfig,
}
