//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions, with the session
//! cookie signed by the mandatory `PARTFINDER_SESSION_SECRET`.

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::WebConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "pf_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with a `SQLite` store.
///
/// Runs the store's own migration so the session table exists before the
/// first request.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn create_session_layer(
    pool: &SqlitePool,
    config: &WebConfig,
) -> Result<SessionManagerLayer<SqliteStore, SignedCookie>, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;

    // Config validation guarantees at least 64 bytes of key material,
    // which is what `Key::from` requires.
    let key = Key::from(config.session_secret.expose_secret().as_bytes());

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
