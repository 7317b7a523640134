//! Admin login and logout.
//!
//! Login failures are uniform: the form re-renders with "Invalid username
//! or password" whether the username was unknown or the password wrong, so
//! the endpoint cannot be used to enumerate accounts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// The uniform login failure message.
const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Path to return to after authenticating.
    pub next: Option<String>,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    /// Post-login redirect target, carried through the form.
    pub next: String,
}

/// Display the login page.
///
/// GET /admin/login
pub async fn login_page(Query(query): Query<LoginQuery>) -> LoginTemplate {
    LoginTemplate {
        error: None,
        next: safe_next(query.next.as_deref()).unwrap_or_default().to_owned(),
    }
}

/// Handle login form submission.
///
/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let next = safe_next(form.next.as_deref());

    match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            set_current_admin(&session, &CurrentAdmin::from(&user)).await?;
            tracing::info!(username = %user.username, "admin logged in");
            Ok(Redirect::to(next.unwrap_or("/admin")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("failed admin login attempt");
            Ok(LoginTemplate {
                error: Some(INVALID_LOGIN_MESSAGE.to_owned()),
                next: next.unwrap_or_default().to_owned(),
            }
            .into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// Logout and clear the session.
///
/// GET /admin/logout
pub async fn logout(
    RequireAdminAuth(admin): RequireAdminAuth,
    session: Session,
) -> Result<Redirect, AppError> {
    clear_current_admin(&session).await?;
    session.flush().await?;

    tracing::info!(username = %admin.username, "admin logged out");
    Ok(Redirect::to("/"))
}

/// Restrict post-login redirects to same-site paths.
///
/// Anything that is not a plain absolute path (`/...`) is discarded;
/// protocol-relative targets (`//evil.example`) would leave the site.
fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next_accepts_site_paths() {
        assert_eq!(safe_next(Some("/admin/edit/3")), Some("/admin/edit/3"));
        assert_eq!(safe_next(Some("/admin")), Some("/admin"));
    }

    #[test]
    fn test_safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(Some("https://evil.example")), None);
        assert_eq!(safe_next(Some("//evil.example")), None);
        assert_eq!(safe_next(Some("admin")), None);
        assert_eq!(safe_next(Some("")), None);
        assert_eq!(safe_next(None), None);
    }
}
