//! Shared application state for the web server.

use std::sync::Arc;

use atlas_client::WorkspaceBackend;
use atlas_config::Config;

use crate::render::Templates;
use crate::resolve::WorkspaceResolver;
use crate::submit::LandingSubmitter;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub submitter: LandingSubmitter,
    pub resolver: WorkspaceResolver,
    pub templates: Templates,
}

impl AppState {
    /// The backend is built by the caller from `config.backend`, or a test double.
    pub fn new(config: Config, backend: Arc<dyn WorkspaceBackend>) -> Result<Self, minijinja::Error> {
        Ok(Self {
            submitter: LandingSubmitter::new(backend.clone()),
            resolver: WorkspaceResolver::new(backend, config.backend.fetch_by_id),
            templates: Templates::new()?,
            config,
        })
    }
}

pub type SharedState = Arc<AppState>;
