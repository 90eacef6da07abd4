//! atlas-common: Shared types, errors, and route helpers used across all Atlas crates.

pub mod error;
pub mod route;
pub mod workspace;

mod lenient;

// Re-export commonly used types
pub use error::{AtlasError, Result};
pub use route::RouteTarget;
pub use workspace::{
    Evidence, Module, SavedItem, SourceQueries, Suggestion, Workspace, WorkspaceSchema,
    WorkspaceType,
};
