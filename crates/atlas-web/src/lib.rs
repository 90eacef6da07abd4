//! atlas-web: Web front end for Atlas.
//! Serves:
//!   - Landing page with search box and prompt chips
//!   - Workspace view (loading shell, error panel, workspace layout)

pub mod error;
pub mod handlers;
pub mod render;
pub mod resolve;
pub mod router;
pub mod session;
pub mod state;
pub mod submit;
