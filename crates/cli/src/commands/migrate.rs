//! Database migration command.
//!
//! Applies the migrations embedded in the web crate
//! (`crates/web/migrations/`) to the configured store.

use super::{CommandError, connect};

/// Run database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    partfinder_web::db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
