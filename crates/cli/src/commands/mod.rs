//! CLI subcommand implementations.

pub mod admin;
pub mod derive;
pub mod export;
pub mod import;
pub mod migrate;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors shared by the database-backed commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Read the database URL from the environment.
fn database_url() -> Result<SecretString, CommandError> {
    std::env::var("PARTFINDER_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("PARTFINDER_DATABASE_URL"))
}

/// Read the bootstrap admin password from the environment.
///
/// Taken from `PARTFINDER_ADMIN_PASSWORD` so it never shows up in shell
/// history or process listings.
fn admin_password() -> Result<SecretString, CommandError> {
    std::env::var("PARTFINDER_ADMIN_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("PARTFINDER_ADMIN_PASSWORD"))
}

/// Connect to the store.
async fn connect() -> Result<SqlitePool, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    Ok(partfinder_web::db::create_pool(&url).await?)
}
