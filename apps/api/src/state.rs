use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The catalog and deck are process-wide statics, so the only per-app pieces
/// are the generator and the config.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Default: `OpenAiClient`; tests swap in stubs.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
