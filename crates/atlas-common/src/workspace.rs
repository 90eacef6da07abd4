//! Workspace document types as produced by the Atlas backend.
//! Decoding is lenient for optional collections; see `Workspace::from_json`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AtlasError, Result};
use crate::lenient;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classification tag assigned by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceType {
    TravelResearch,
    PurchaseResearch,
    LearningPlan,
    ProjectPlanner,
    /// Missing, or a tag outside the known set.
    #[default]
    #[serde(other)]
    Unrecognized,
}

impl WorkspaceType {
    /// Human label, e.g. "Travel Research".
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceType::TravelResearch   => "Travel Research",
            WorkspaceType::PurchaseResearch => "Purchase Research",
            WorkspaceType::LearningPlan     => "Learning Plan",
            WorkspaceType::ProjectPlanner   => "Project Planner",
            WorkspaceType::Unrecognized     => "Workspace",
        }
    }
}

fn lenient_workspace_type<'de, D>(de: D) -> std::result::Result<WorkspaceType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Module {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Per-source search queries. Keys outside the fixed set are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceQueries {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub maps: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub reddit: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub web: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub academic: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceSchema {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub modules: Vec<Module>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub recommended_sources: Vec<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub source_queries: Option<SourceQueries>,
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// A labelled external URL backing a suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    #[serde(default, deserialize_with = "lenient::string")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reason: String,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub evidence: Vec<Evidence>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub actions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Saved items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedItem {
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional_string", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// A backend-generated research workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub query: String,
    #[serde(default, deserialize_with = "lenient_workspace_type")]
    pub workspace_type: WorkspaceType,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub schema: Option<WorkspaceSchema>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub modules: Vec<Module>,
    /// `None` when the backend did not send a usable list.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Option::is_none")]
    pub enabled_sources: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub saved_items: Vec<SavedItem>,
}

impl Workspace {
    /// Decode and validate a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Validate a decoded JSON document. Only a missing `id` or a non-object
    /// body is fatal; everything else is coerced.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AtlasError::Payload(
                "workspace response is not a JSON object".to_string(),
            ));
        }
        let workspace: Workspace = serde_json::from_value(value)?;
        if workspace.id.trim().is_empty() {
            return Err(AtlasError::Payload("workspace response has no id".to_string()));
        }
        Ok(workspace)
    }

    /// Schema title when present and non-blank.
    pub fn title(&self) -> Option<&str> {
        self.schema
            .as_ref()
            .map(|s| s.title.trim())
            .filter(|t| !t.is_empty())
    }
}
