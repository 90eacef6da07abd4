//! Landing query submitter: query → backend → navigation.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info, instrument};
use uuid::Uuid;

use atlas_client::WorkspaceBackend;
use atlas_common::route::{encode_segment, workspace_path};

/// Where the browser goes next, plus an optional alert shown on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub location: String,
    pub alert: Option<String>,
}

impl Navigation {
    pub fn to(location: impl Into<String>) -> Self {
        Self { location: location.into(), alert: None }
    }

    /// The redirect target, with the alert carried as `?alert=`.
    pub fn href(&self) -> String {
        match &self.alert {
            Some(alert) => format!("{}?alert={}", self.location, encode_segment(alert)),
            None => self.location.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyQuery,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Navigate(Navigation),
}

/// Submits landing queries, one in-flight request per session.
pub struct LandingSubmitter {
    backend: Arc<dyn WorkspaceBackend>,
    in_flight: Mutex<HashSet<Uuid>>,
}

/// Clears the session's in-flight flag when dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<Uuid>>,
    session: Uuid,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.session);
    }
}

fn lock(set: &Mutex<HashSet<Uuid>>) -> MutexGuard<'_, HashSet<Uuid>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl LandingSubmitter {
    pub fn new(backend: Arc<dyn WorkspaceBackend>) -> Self {
        Self { backend, in_flight: Mutex::new(HashSet::new()) }
    }

    fn begin(&self, session: Uuid) -> Option<InFlight<'_>> {
        lock(&self.in_flight)
            .insert(session)
            .then(|| InFlight { set: &self.in_flight, session })
    }

    pub fn is_in_flight(&self, session: Uuid) -> bool {
        lock(&self.in_flight).contains(&session)
    }

    /// Submit raw input from the search box or a prompt chip.
    ///
    /// The trimmed text goes to the backend. On failure the browser is sent to
    /// the workspace route for the *raw* text so the workspace view can retry.
    #[instrument(skip(self, raw), fields(len = raw.len()))]
    pub async fn submit(&self, session: Uuid, raw: &str) -> SubmitOutcome {
        let query = raw.trim();
        if query.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyQuery);
        }
        let Some(_guard) = self.begin(session) else {
            info!("Submission ignored, request already in flight");
            return SubmitOutcome::Ignored(IgnoreReason::InFlight);
        };

        match self.backend.create_workspace(query).await {
            Ok(workspace) => {
                info!(id = %workspace.id, "Workspace created");
                SubmitOutcome::Navigate(Navigation::to(workspace_path(&workspace.id)))
            }
            Err(e) => {
                error!(error = %e, "Error creating workspace");
                SubmitOutcome::Navigate(Navigation {
                    location: workspace_path(raw),
                    alert: Some(format!("Error: {e}")),
                })
            }
        }
    }
}
