mod catalog;
mod config;
mod errors;
mod llm_client;
mod oracle;
mod routes;
mod state;
mod tarot;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Oracle API v{}", env!("CARGO_PKG_VERSION"));

    // The credential is read per request; only warn here so the service still boots.
    let key_env = &config.openai_api_key_env;
    if std::env::var(key_env).map_or(true, |k| k.trim().is_empty()) {
        warn!("{key_env} is not set; readings will fail with a configuration error");
    }

    let generator = OpenAiClient::new(&config.openai_base_url, &config.openai_model)
        .with_api_key_env(key_env);
    info!("LLM client initialized (model: {})", generator.model());

    info!(
        "Catalog loaded: {} categories, {} cards",
        catalog::CATEGORIES.len(),
        tarot::all_cards().len()
    );

    let state = AppState {
        generator: Arc::new(generator),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
