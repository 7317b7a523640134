//! Snapshot export command.

use std::path::Path;

use partfinder_web::services::export::{ExportError, export_snapshot};

use super::CommandError;

/// Errors from the export command.
#[derive(Debug, thiserror::Error)]
pub enum ExportCommandError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Regenerate a snapshot file from the store.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the file cannot be
/// written.
pub async fn run(file: &Path) -> Result<(), ExportCommandError> {
    let pool = super::connect().await?;

    let count = export_snapshot(&pool, file).await?;
    tracing::info!(items = count, path = %file.display(), "export finished");
    Ok(())
}
