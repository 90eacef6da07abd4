//! Workspace route resolution: route segment → backend call → view state.

use std::sync::Arc;

use tracing::{error, info, instrument};

use atlas_client::WorkspaceBackend;
use atlas_common::{RouteTarget, Workspace};

/// Render state of the workspace page once the backend call has settled.
/// Loading is the shell page served before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Failed { message: String },
    Ready(Box<Workspace>),
}

/// Outcome of one activation of the workspace view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Decoded route segment, or the raw one if it could not be decoded.
    pub route_query: String,
    pub state: ViewState,
}

pub struct WorkspaceResolver {
    backend: Arc<dyn WorkspaceBackend>,
    fetch_by_id: bool,
}

impl WorkspaceResolver {
    pub fn new(backend: Arc<dyn WorkspaceBackend>, fetch_by_id: bool) -> Self {
        Self { backend, fetch_by_id }
    }

    /// Decode the raw segment and make exactly one backend call.
    ///
    /// `ws_` ids are fetched only when `fetch_by_id` is on; otherwise both
    /// branches re-create the workspace from the decoded text.
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw_segment: &str) -> Resolved {
        let target = match RouteTarget::from_segment(raw_segment) {
            Ok(target) => target,
            Err(e) => {
                error!(error = %e, "Could not decode workspace route");
                return Resolved {
                    route_query: raw_segment.to_string(),
                    state: ViewState::Failed { message: e.to_string() },
                };
            }
        };

        let result = match &target {
            RouteTarget::WorkspaceId(id) if self.fetch_by_id => {
                self.backend.fetch_workspace(id).await
            }
            other => self.backend.create_workspace(other.as_str()).await,
        };

        let state = match result {
            Ok(workspace) => {
                info!(
                    id = %workspace.id,
                    suggestions = workspace.suggestions.len(),
                    "Workspace data received"
                );
                ViewState::Ready(Box::new(workspace))
            }
            Err(e) => {
                error!(error = %e, "Error fetching workspace");
                ViewState::Failed { message: e.to_string() }
            }
        };

        Resolved { route_query: target.as_str().to_string(), state }
    }
}
