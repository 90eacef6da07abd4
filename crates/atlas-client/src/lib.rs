//! atlas-client: Client for the Atlas workspace backend.
//! The only operation the backend guarantees is workspace creation:
//!   POST {base_url}/api/workspace/create  {"query": "..."}

pub mod backend;

pub use backend::{BackendError, HttpBackend, WorkspaceBackend};
