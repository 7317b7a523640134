//! Admin account management commands.

use partfinder_web::services::auth::{AuthError, AuthService};

use super::{CommandError, admin_password, connect};

use secrecy::ExposeSecret;

/// Errors from the admin commands.
#[derive(Debug, thiserror::Error)]
pub enum AdminCommandError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a new admin account.
///
/// The password comes from `PARTFINDER_ADMIN_PASSWORD` so it never appears
/// in shell history.
///
/// # Errors
///
/// Returns an error if the password env var is missing, the username is
/// invalid or taken, or the store is unreachable.
pub async fn create_user(username: &str) -> Result<(), AdminCommandError> {
    let password = admin_password()?;
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .create_admin(username, password.expose_secret())
        .await?;

    tracing::info!(username = %user.username, id = %user.id, "admin account created");
    Ok(())
}
