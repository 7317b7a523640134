//! Snapshot import.
//!
//! One-off migration of a `products.json` snapshot into the relational
//! store. Two modes:
//!
//! - [`ImportMode::SkipIfPopulated`] - the guard mode: if the product table
//!   already has rows, the run is a no-op. No partial merges.
//! - [`ImportMode::Reset`] - destructive: drops and recreates the schema,
//!   recreates the bootstrap admin account, then loads every item.
//!
//! Items are deserialized one at a time; a malformed item is logged and
//! skipped rather than aborting the batch, and missing fields fall back to
//! the `"Unknown"`/`0` sentinels. A malformed or missing snapshot file
//! aborts the whole run.

use std::path::Path;

use secrecy::SecretString;
use sqlx::SqlitePool;

use partfinder_core::ProductRecord;

use crate::db::{MIGRATOR, ProductRepository, RepositoryError};
use crate::models::product::NewProduct;
use crate::services::auth::{AuthError, AuthService};

/// Sentinel for text fields absent from an imported item.
const UNKNOWN: &str = "Unknown";

/// How the import treats an already-populated store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Skip the whole run if the product table has any rows.
    SkipIfPopulated,
    /// Drop and recreate the schema, then load everything.
    Reset,
}

/// Outcome of an import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Items successfully inserted.
    pub imported: usize,
    /// Items skipped due to per-item conversion errors.
    pub skipped: usize,
}

/// Errors that abort an import run.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The snapshot file could not be read.
    #[error("cannot read snapshot {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot document is not valid JSON.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Rerunning migrations after the reset failed.
    #[error("schema migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Recreating the bootstrap admin failed.
    #[error("bootstrap admin creation failed: {0}")]
    Bootstrap(#[from] AuthError),

    /// Reset mode was requested without a bootstrap password.
    #[error("reset mode requires PARTFINDER_ADMIN_PASSWORD to recreate the admin account")]
    MissingBootstrapPassword,
}

/// Snapshot wrapper that defers item decoding so one bad item can be
/// skipped without losing the rest.
#[derive(serde::Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Import a snapshot file into the store.
///
/// # Errors
///
/// Returns `ImportError` if the file is unreadable or malformed, if the
/// store rejects an operation, or (in reset mode) if the schema or
/// bootstrap account cannot be recreated.
pub async fn import_snapshot(
    pool: &SqlitePool,
    path: &Path,
    mode: ImportMode,
    bootstrap_password: Option<&SecretString>,
) -> Result<ImportReport, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let raw: RawSnapshot = serde_json::from_str(text.trim_start_matches('\u{feff}'))?;

    tracing::info!(items = raw.items.len(), path = %path.display(), "loaded snapshot");

    let products = ProductRepository::new(pool);

    match mode {
        ImportMode::SkipIfPopulated => {
            // The guard mode still creates missing tables, so a first run
            // against a fresh database works without a separate migrate.
            MIGRATOR.run(pool).await?;
            let existing = products.count().await?;
            if existing > 0 {
                tracing::info!(existing, "store already contains data; skipping migration");
                return Ok(ImportReport::default());
            }
        }
        ImportMode::Reset => {
            let password = bootstrap_password.ok_or(ImportError::MissingBootstrapPassword)?;
            reset_schema(pool).await?;
            AuthService::new(pool).ensure_bootstrap_admin(password).await?;
        }
    }

    let mut report = ImportReport::default();

    for (index, value) in raw.items.into_iter().enumerate() {
        let record = match serde_json::from_value::<ProductRecord>(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed item");
                report.skipped += 1;
                continue;
            }
        };

        let new = with_sentinels(record);
        match products.insert(&new).await {
            Ok(_) => report.imported += 1,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping item the store rejected");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "migration complete"
    );
    Ok(report)
}

/// Drop every application table and rerun the embedded migrations.
async fn reset_schema(pool: &SqlitePool) -> Result<(), ImportError> {
    tracing::warn!("resetting schema: all catalog and admin data will be dropped");

    sqlx::query("DROP TABLE IF EXISTS product").execute(pool).await.map_err(RepositoryError::from)?;
    sqlx::query("DROP TABLE IF EXISTS admin_user").execute(pool).await.map_err(RepositoryError::from)?;
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations").execute(pool).await.map_err(RepositoryError::from)?;

    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Apply the `"Unknown"`/`0` sentinels to fields the snapshot left empty.
fn with_sentinels(record: ProductRecord) -> NewProduct {
    let mut new = NewProduct::from(record);

    for field in [
        &mut new.product_type,
        &mut new.lwc,
        &mut new.insulation,
        &mut new.length,
        &mut new.blade_size,
        &mut new.layers,
    ] {
        if field.is_empty() {
            *field = UNKNOWN.to_owned();
        }
    }

    new
}
