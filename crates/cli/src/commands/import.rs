//! Snapshot import command.

use std::path::Path;

use partfinder_web::services::import::{ImportError, ImportMode, import_snapshot};

use super::{CommandError, admin_password, connect};

/// Errors from the import command.
#[derive(Debug, thiserror::Error)]
pub enum ImportCommandError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Load a snapshot file into the store.
///
/// Without `--reset`, an already-populated store makes the run a no-op.
/// With `--reset`, the schema is dropped and recreated first and the
/// bootstrap admin account restored from `PARTFINDER_ADMIN_PASSWORD`.
///
/// # Errors
///
/// Returns an error if the snapshot is unreadable/malformed or the store
/// rejects the run; per-item failures are logged and skipped instead.
pub async fn run(file: &Path, reset: bool) -> Result<(), ImportCommandError> {
    let pool = connect().await?;

    let (mode, password) = if reset {
        (ImportMode::Reset, Some(admin_password()?))
    } else {
        (ImportMode::SkipIfPopulated, None)
    };

    let report = import_snapshot(&pool, file, mode, password.as_ref()).await?;

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "import finished"
    );
    Ok(())
}
