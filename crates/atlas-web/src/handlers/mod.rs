//! HTTP handlers for all web routes.

pub mod landing;
pub mod workspace;

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
