//! Page rendering with minijinja. Templates are compiled into the binary and
//! HTML-escaped automatically, so backend text is never emitted raw.

use minijinja::{context, Environment};
use serde::Serialize;

use atlas_common::route::workspace_path;
use atlas_common::{RouteTarget, SavedItem, Suggestion, Workspace};

use crate::resolve::{Resolved, ViewState};

/// Shown unchecked when the backend sends no `enabled_sources`.
pub const DEFAULT_SOURCES: [&str; 5] = ["Web", "Reddit", "YouTube", "Maps", "Academic"];

pub const FALLBACK_TITLE: &str = "Workspace";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceEntry {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvidenceLink {
    pub label: String,
    /// Only http(s) URLs become links.
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionCard {
    pub title: String,
    pub category: Option<String>,
    pub reason: String,
    pub evidence: Vec<EvidenceLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedCard {
    pub title: String,
    pub notes: Option<String>,
}

/// Upper-case the first character only: "youtube" → "Youtube".
pub fn capitalize(source: &str) -> String {
    let mut chars = source.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn source_entries(enabled: Option<&[String]>) -> Vec<SourceEntry> {
    match enabled {
        Some(sources) => sources
            .iter()
            .map(|s| SourceEntry { label: capitalize(s), checked: true })
            .collect(),
        None => DEFAULT_SOURCES
            .iter()
            .map(|s| SourceEntry { label: s.to_string(), checked: false })
            .collect(),
    }
}

fn safe_href(url: &str) -> Option<String> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")).then(|| url.to_string())
}

fn suggestion_card(s: &Suggestion) -> SuggestionCard {
    SuggestionCard {
        title: s.title.clone(),
        category: Some(s.category.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        reason: s.reason.clone(),
        evidence: s
            .evidence
            .iter()
            .map(|e| EvidenceLink { label: e.label.clone(), href: safe_href(&e.url) })
            .collect(),
    }
}

fn saved_card(item: &SavedItem) -> SavedCard {
    SavedCard {
        title: item.title.clone(),
        notes: item.notes.clone().filter(|n| !n.trim().is_empty()),
    }
}

fn count_label(n: usize) -> String {
    format!("{n} suggestions")
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("landing.html", include_str!("../templates/landing.html"))?;
        env.add_template("loading.html", include_str!("../templates/loading.html"))?;
        env.add_template("error.html", include_str!("../templates/error.html"))?;
        env.add_template("workspace.html", include_str!("../templates/workspace.html"))?;
        Ok(Self { env })
    }

    pub fn landing(&self, prompt_chips: &[String]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("landing.html")?
            .render(context! { prompt_chips })
    }

    /// Loading state. The page requests `resolve_url` once and swaps itself out.
    ///
    /// The URL is rebuilt from the decoded segment so `/`, `?` and `%` stay
    /// inside the one path segment. An undecodable segment is kept as sent so
    /// the resolver can report it.
    pub fn loading(&self, raw_segment: &str, alert: Option<&str>) -> Result<String, minijinja::Error> {
        let resolve_url = match RouteTarget::from_segment(raw_segment) {
            Ok(target) => format!("{}/resolve", workspace_path(target.as_str())),
            Err(_) => format!("/workspace/{raw_segment}/resolve"),
        };
        self.env
            .get_template("loading.html")?
            .render(context! { resolve_url, alert })
    }

    pub fn resolved(&self, resolved: &Resolved) -> Result<String, minijinja::Error> {
        match &resolved.state {
            ViewState::Failed { message } => self
                .env
                .get_template("error.html")?
                .render(context! { message }),
            ViewState::Ready(workspace) => self.workspace(workspace, &resolved.route_query),
        }
    }

    pub fn workspace(&self, ws: &Workspace, route_query: &str) -> Result<String, minijinja::Error> {
        let title = ws.title().unwrap_or(FALLBACK_TITLE);
        let subtitle = if ws.query.is_empty() { route_query } else { ws.query.as_str() };
        let suggestions: Vec<SuggestionCard> = ws.suggestions.iter().map(suggestion_card).collect();
        let saved_items: Vec<SavedCard> = ws.saved_items.iter().map(saved_card).collect();

        self.env.get_template("workspace.html")?.render(context! {
            title,
            subtitle,
            workspace_type => ws.workspace_type.label(),
            permalink => workspace_path(&ws.id),
            sources => source_entries(ws.enabled_sources.as_deref()),
            saved_items,
            suggestion_count => count_label(suggestions.len()),
            suggestions,
        })
    }
}
