//! Authentication service.
//!
//! Passwords are hashed with Argon2id and compared via the PHC string
//! format. Login failures are deliberately indistinguishable: a missing
//! user and a wrong password both surface as [`AuthError::InvalidCredentials`]
//! so responses cannot be used to enumerate usernames.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;

use partfinder_core::{Username, UsernameError};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::AdminUser;

/// Username of the account created automatically on an empty store.
pub const BOOTSTRAP_USERNAME: &str = "admin";

/// Minimum password length for newly created accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The username/password pair did not match. Covers unknown usernames
    /// as well as wrong passwords.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The username is already taken.
    #[error("username already exists")]
    UsernameTaken,

    /// The password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The username is not a valid [`Username`].
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying repository error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Verify a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` whether the username is
    /// unknown or the password is wrong; callers must not distinguish the
    /// two. Returns `AuthError::Repository` if the lookup itself fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Create a new admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` for a malformed username,
    /// `AuthError::WeakPassword` if the password is too short,
    /// `AuthError::UsernameTaken` if the username exists.
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Create the bootstrap `admin` account if the user table is empty.
    ///
    /// Returns `Ok(None)` when accounts already exist and nothing was done.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` or `AuthError::Repository` when
    /// creation fails.
    pub async fn ensure_bootstrap_admin(
        &self,
        password: &SecretString,
    ) -> Result<Option<AdminUser>, AuthError> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .create_admin(BOOTSTRAP_USERNAME, password.expose_secret())
            .await?;

        tracing::info!(username = BOOTSTRAP_USERNAME, "created bootstrap admin account");
        Ok(Some(user))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough password").is_ok());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
