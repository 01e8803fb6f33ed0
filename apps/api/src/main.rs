mod catalog;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod search;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::store::PgCatalogStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search::narrator::Narrator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DormHub API v{}", env!("CARGO_PKG_VERSION"));

    // Catalog store: no pool, every call opens and releases its own connection
    let store = Arc::new(PgCatalogStore::new(config.database_url.clone()));

    // Initialize LLM client
    let llm = LlmClient::from_config(&config)?;
    if config.llm_api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set; AI summaries will use the fallback message");
    }
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        store,
        narrator: Narrator::new(Arc::new(llm)),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
