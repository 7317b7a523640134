//! Frontend shell route handlers.
//!
//! The catalog frontend is a single static shell that drives itself from
//! `/api/products`; unmatched paths get the same shell with a 404 status so
//! deep links land somewhere useful.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// The single-page frontend shell.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Serve the frontend shell.
pub async fn index() -> IndexTemplate {
    IndexTemplate
}

/// Fallback for unmatched paths: the shell body with a 404 status.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, IndexTemplate)
}
