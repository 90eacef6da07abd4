//! Workspace view: loading shell and resolution.

use axum::{
    extract::{OriginalUri, Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::error::WebError;
use crate::state::SharedState;

const WORKSPACE_PREFIX: &str = "/workspace/";
const RESOLVE_SUFFIX: &str = "/resolve";

#[derive(Debug, Deserialize)]
pub struct ShellParams {
    pub alert: Option<String>,
}

/// Everything after `/workspace/` exactly as it appeared in the request URI.
/// Path extractors decode params up front; decoding happens once, in the resolver.
fn raw_segment(path: &str) -> &str {
    path.strip_prefix(WORKSPACE_PREFIX).unwrap_or_default()
}

/// GET /workspace/{id}: loading state.
pub async fn workspace_shell(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    Query(shell): Query<ShellParams>,
) -> Result<Html<String>, WebError> {
    let segment = raw_segment(uri.path());
    debug!(segment, "Rendering workspace shell");
    Ok(Html(state.templates.loading(segment, shell.alert.as_deref())?))
}

/// GET /workspace/{id}/resolve: one backend call, then the error or workspace page.
pub async fn workspace_resolve(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, WebError> {
    let rest = raw_segment(uri.path());
    let segment = rest.strip_suffix(RESOLVE_SUFFIX).unwrap_or(rest);
    let resolved = state.resolver.resolve(segment).await;
    Ok(Html(state.templates.resolved(&resolved)?).into_response())
}
