//! Atlas Web Server
//!
//! Run with: cargo run -p atlas-web

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use atlas_client::HttpBackend;
use atlas_config::Config;
use atlas_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before logging, so RUST_LOG may come from .env
    let dotenv = dotenvy::dotenv();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("atlas=debug,info")),
        )
        .init();

    info!("Starting Atlas Web Server...");
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let config = Config::load().context("loading configuration")?;
    let backend = HttpBackend::from_config(&config.backend)?;
    info!(
        backend = backend.base_url(),
        fetch_by_id = config.backend.fetch_by_id,
        "Configuration loaded"
    );
    let addr = config.bind_addr();
    let state = AppState::new(config, Arc::new(backend))?;

    // Build router
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
