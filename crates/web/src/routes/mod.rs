//! HTTP route handlers for the catalog site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Frontend shell (also the 404 fallback body)
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (verifies DB connectivity)
//!
//! # Public API
//! GET  /api/products        - Full product list as JSON
//!
//! # Admin (session-gated except login)
//! GET  /admin               - Product listing
//! GET  /admin/login         - Login page
//! POST /admin/login         - Login action
//! GET  /admin/logout        - Logout action
//! GET  /admin/add           - Empty product form
//! POST /admin/add           - Create product
//! GET  /admin/edit/{id}     - Edit form
//! POST /admin/edit/{id}     - Update product
//! POST /admin/delete/{id}   - Delete product
//! ```

pub mod admin;
pub mod api;
pub mod home;

use std::any::Any;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Router, routing::get};
use bytes::Bytes;
use http_body_util::Full;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Build the full application router, including the session layer.
///
/// Static file serving and Sentry layers are added by `main`, which knows
/// the deployment paths; everything the integration tests need lives here.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session store cannot be initialized.
pub async fn app(state: AppState) -> Result<Router, sqlx::Error> {
    let session_layer = middleware::create_session_layer(state.pool(), state.config()).await?;

    Ok(Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/", get(home::index))
        .route("/api/products", get(api::products))
        .nest("/admin", admin::router())
        .fallback(home::not_found)
        .layer(session_layer)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Convert a handler panic into the generic 500 JSON body.
///
/// The panic detail goes to the logs only.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::http::Response<Full<Bytes>> {
    let detail = err.downcast_ref::<String>().map_or_else(
        || {
            err.downcast_ref::<&str>()
                .map_or("unknown panic", |s| *s)
                .to_owned()
        },
        Clone::clone,
    );
    tracing::error!(panic = %detail, "request handler panicked");

    let body = serde_json::json!({ "error": "internal server error" }).to_string();
    let mut response = axum::http::Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
