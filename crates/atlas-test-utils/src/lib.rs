//! Shared testing utilities: workspace fixtures and a recording backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use atlas_client::{BackendError, WorkspaceBackend};
use atlas_common::{AtlasError, Workspace};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A complete document in the shape the backend returns from `/api/workspace/create`.
pub fn workspace_json(id: &str, query: &str) -> Value {
    json!({
        "id": id,
        "query": query,
        "workspace_type": "travel_research",
        "schema": {
            "title": "Japan Travel Planning Workspace",
            "modules": [
                {"type": "sources_panel"},
                {"type": "saved_panel"},
                {"type": "suggestions_panel"},
                {"type": "map_panel"}
            ],
            "recommended_sources": ["maps", "web", "reddit", "youtube"],
            "source_queries": {
                "maps": ["tokyo food markets"],
                "reddit": ["japan travel tips"]
            }
        },
        "suggestions": [
            {
                "title": "Japan Travel Guide - Lonely Planet",
                "category": "travel_guide",
                "reason": "Covers regions, budgets and seasonal food festivals.",
                "evidence": [
                    {"source": "web", "label": "Lonely Planet Japan", "url": "https://www.lonelyplanet.com/japan"},
                    {"source": "reddit", "label": "r/JapanTravel", "url": "https://reddit.com/r/JapanTravel"}
                ],
                "actions": ["save", "open"]
            },
            {
                "title": "Budget Eats in Osaka",
                "category": "",
                "reason": "Street food under 1000 yen.",
                "evidence": [],
                "actions": ["save"]
            }
        ],
        "enabled_sources": ["maps", "web", "reddit", "youtube"],
        "saved_items": []
    })
}

pub fn workspace(id: &str, query: &str) -> Workspace {
    match Workspace::from_value(workspace_json(id, query)) {
        Ok(ws) => ws,
        Err(e) => panic!("fixture does not decode: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Recording backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Create(String),
    Fetch(String),
}

type Responder = dyn Fn(&BackendCall) -> Result<Workspace, BackendError> + Send + Sync;

/// Holds every call until the test releases it.
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until a call has reached the backend.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// In-memory `WorkspaceBackend` that records calls and answers from a closure.
pub struct RecordingBackend {
    calls: Mutex<Vec<BackendCall>>,
    responder: Box<Responder>,
    gate: Option<Gate>,
}

impl RecordingBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&BackendCall) -> Result<Workspace, BackendError> + Send + Sync + 'static,
    {
        Self { calls: Mutex::new(Vec::new()), responder: Box::new(responder), gate: None }
    }

    /// Answers every call with the fixture, echoing the query and using `id`.
    pub fn succeeding(id: &str) -> Self {
        let id = id.to_string();
        Self::new(move |call| {
            let query = match call {
                BackendCall::Create(q) => q.as_str(),
                BackendCall::Fetch(_) => "fetched",
            };
            Ok(workspace(&id, query))
        })
    }

    /// Answers every call with a non-2xx status.
    pub fn failing_with_status(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Err(BackendError::Status { status, body: body.clone() }))
    }

    /// Answers every call with a body that is not a workspace.
    pub fn malformed() -> Self {
        Self::new(|_| Err(BackendError::Payload(AtlasError::Payload("workspace response has no id".to_string()))))
    }

    /// Answers every call with the given raw JSON document.
    pub fn returning_json(doc: Value) -> Self {
        Self::new(move |_| Ok(Workspace::from_value(doc.clone())?))
    }

    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::default();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    async fn answer(&self, call: BackendCall) -> Result<Workspace, BackendError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        (self.responder)(&call)
    }
}

#[async_trait]
impl WorkspaceBackend for RecordingBackend {
    async fn create_workspace(&self, query: &str) -> Result<Workspace, BackendError> {
        self.answer(BackendCall::Create(query.to_string())).await
    }

    async fn fetch_workspace(&self, id: &str) -> Result<Workspace, BackendError> {
        self.answer(BackendCall::Fetch(id.to_string())).await
    }
}
