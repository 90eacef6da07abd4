//! Axum router: maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    healthz,
    landing::{landing_page, search_submit},
    workspace::{workspace_resolve, workspace_shell},
};
use crate::state::{AppState, SharedState};

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                        get(landing_page))
        .route("/search",                  post(search_submit))
        .route("/workspace/{id}",          get(workspace_shell))
        .route("/workspace/{id}/resolve",  get(workspace_resolve))

        .route("/healthz", get(healthz))

        // Static files
        .nest_service("/static", ServeDir::new(STATIC_DIR))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
