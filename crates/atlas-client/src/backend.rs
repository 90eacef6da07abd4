//! Backend trait and the reqwest implementation.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use atlas_common::route::encode_segment;
use atlas_common::{AtlasError, Workspace};
use atlas_config::BackendConfig;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}, message: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Payload(#[from] AtlasError),
}

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateWorkspaceRequest<'a> {
    pub query: &'a str,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait WorkspaceBackend: Send + Sync {
    /// Create a workspace for a free-text query. Exactly one attempt.
    async fn create_workspace(&self, query: &str) -> Result<Workspace, BackendError>;

    /// Load a previously created workspace by id.
    async fn fetch_workspace(&self, id: &str) -> Result<Workspace, BackendError>;
}

/// Read the body once; non-2xx keeps the raw text for the error message.
async fn read_workspace(resp: reqwest::Response) -> Result<Workspace, BackendError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        warn!(status = status.as_u16(), %body, "Backend returned an error status");
        return Err(BackendError::Status { status: status.as_u16(), body });
    }
    let workspace = Workspace::from_json(&body)?;
    debug!(
        id = %workspace.id,
        suggestions = workspace.suggestions.len(),
        "Workspace payload decoded"
    );
    Ok(workspace)
}

// ── HTTP ──────────────────────────────────────────────────────────────────────

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WorkspaceBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn create_workspace(&self, query: &str) -> Result<Workspace, BackendError> {
        let url = format!("{}/api/workspace/create", self.base_url);
        debug!(%url, "Calling backend API");
        let resp = self
            .client
            .post(&url)
            .json(&CreateWorkspaceRequest { query })
            .send()
            .await?;
        read_workspace(resp).await
    }

    #[instrument(skip(self))]
    async fn fetch_workspace(&self, id: &str) -> Result<Workspace, BackendError> {
        let url = format!("{}/api/workspace/{}", self.base_url, encode_segment(id));
        let resp = self.client.get(&url).send().await?;
        read_workspace(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_status_error_message() {
        let err = BackendError::Status { status: 500, body: "boom".to_string() };
        assert_eq!(err.to_string(), "HTTP error! status: 500, message: boom");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(CreateWorkspaceRequest { query: "plan a trip" }).unwrap();
        assert_eq!(body, serde_json::json!({"query": "plan a trip"}));
    }
}
