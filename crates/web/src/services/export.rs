//! Snapshot export.
//!
//! After every successful admin mutation the whole product table is
//! re-serialized to the `products.json` snapshot. The file is always
//! rewritten from scratch, never patched, so it can't drift from the store.
//! The write goes to a sibling temp file first and is renamed into place,
//! which keeps a concurrent reader of the statically served copy from ever
//! seeing a half-written document.

use std::path::Path;

use sqlx::SqlitePool;

use partfinder_core::{ProductRecord, Snapshot};

use crate::db::{ProductRepository, RepositoryError};

/// Errors that can occur while exporting the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Reading the store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Serializing the snapshot failed.
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the snapshot file failed.
    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Regenerate the snapshot file from the current store state.
///
/// # Errors
///
/// Returns `ExportError` if the store read, serialization, or file write
/// fails. The previous snapshot survives any failure.
pub async fn export_snapshot(pool: &SqlitePool, path: &Path) -> Result<usize, ExportError> {
    let products = ProductRepository::new(pool).list_all().await?;

    let snapshot = Snapshot {
        items: products.into_iter().map(ProductRecord::from).collect(),
    };
    let count = snapshot.items.len();
    let text = snapshot.to_row_json()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    // Temp file in the same directory so the rename stays on one filesystem.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)?;

    tracing::info!(items = count, path = %path.display(), "snapshot regenerated");
    Ok(count)
}
