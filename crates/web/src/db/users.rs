//! Admin user repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use partfinder_core::{UserId, Username};

use super::RepositoryError;
use crate::models::user::AdminUser;

/// Internal row type for admin user queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            username,
            created_at: row.created_at,
        })
    }
}

/// Repository for admin user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user and their password hash by username.
    ///
    /// The lookup is exact and case-sensitive. Returns `None` if no such
    /// user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, username, password_hash, created_at \
             FROM admin_user WHERE username = ?1",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let hash = row.password_hash.clone();
        let user = AdminUser::try_from(row)?;

        Ok(Some((user, hash)))
    }

    /// Create a new admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            "INSERT INTO admin_user (username, password_hash, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id, username, password_hash, created_at",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Count all admin users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_user")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
