//! Test harness for driving the Partfinder router in-process.
//!
//! Each test gets its own `SQLite` database in a temp directory, the real
//! migrations, and the real router (session layer included). Requests go
//! through `tower::ServiceExt::oneshot`; session cookies are carried by
//! hand between requests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use partfinder_web::config::WebConfig;
use partfinder_web::services::auth::AuthService;
use partfinder_web::state::AppState;
use partfinder_web::{db, routes};

/// Credentials used by most tests.
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "integration-test-password";

/// A fully wired application instance backed by a temp database.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub snapshot_path: PathBuf,
    _tmp: TempDir,
}

/// Spin up a fresh app: temp dir, migrated database, real router.
pub async fn spawn() -> TestApp {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let db_path = tmp.path().join("partfinder-test.db");
    let snapshot_path = tmp.path().join("products.json");

    let config = WebConfig {
        database_url: SecretString::from(format!("sqlite://{}", db_path.display())),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:8003".to_owned(),
        // Key::from requires 64 bytes of material.
        session_secret: SecretString::from(
            "integration-test-session-signing-key-0123456789abcdef0123456789abcdef".to_owned(),
        ),
        snapshot_path: snapshot_path.clone(),
        bootstrap_admin_password: None,
        sentry_dsn: None,
        sentry_environment: None,
    };

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("create pool");
    db::MIGRATOR.run(&pool).await.expect("run migrations");

    let state = AppState::new(config, pool.clone());
    let router = routes::app(state).await.expect("build router");

    TestApp {
        router,
        pool,
        snapshot_path,
        _tmp: tmp,
    }
}

/// Spawn an app with the standard test admin account already created.
pub async fn spawn_with_admin() -> TestApp {
    let app = spawn().await;
    AuthService::new(&app.pool)
        .create_admin(TEST_USERNAME, TEST_PASSWORD)
        .await
        .expect("create test admin");
    app
}

/// Issue a GET request, optionally with a session cookie.
pub async fn get(app: &TestApp, path: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, path, cookie, None).await
}

/// Issue a form-encoded POST request, optionally with a session cookie.
pub async fn post_form(
    app: &TestApp,
    path: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, path, cookie, Some(body)).await
}

async fn send(
    app: &TestApp,
    method: Method,
    path: &str,
    cookie: Option<&str>,
    form_body: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match form_body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("route request")
}

/// Read a response body to a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Extract the session cookie pair from a response, if one was set.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(str::to_owned)
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

/// Log in with the given credentials and return the session cookie.
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let body = format!("username={username}&password={password}");
    let response = post_form(app, "/admin/login", &body, None).await;
    assert!(
        response.status().is_redirection(),
        "expected login redirect, got {}",
        response.status()
    );
    session_cookie(&response).expect("login should establish a session")
}

/// A form body for a valid product, varying only the lwc.
#[must_use]
pub fn product_form(lwc: &str) -> String {
    format!(
        "product_type=A&lwc={lwc}&partner=&insulation=FOIL&length=30\
         &blade_size=1%2F4&layers=2&qty_per_pallet=10&box_pallet=5&part_number="
    )
}
