//! Part-number derivation command.
//!
//! A pure file-to-file transform: reads a snapshot, computes a part number
//! for every item (expanding `80/82` pair records), writes a new snapshot.
//! The store is never touched.

use std::path::Path;

use partfinder_core::part_number::derive_records;
use partfinder_core::Snapshot;

/// Errors from the derive command. Any of them aborts the batch run.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    #[error("cannot read snapshot {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write snapshot {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Derive part numbers for every item in `input`, writing to `output`.
///
/// # Errors
///
/// Returns `DeriveError` if the input is unreadable or malformed, or the
/// output cannot be written.
pub fn run(input: &Path, output: &Path) -> Result<(), DeriveError> {
    let text = std::fs::read_to_string(input).map_err(|source| DeriveError::Read {
        path: input.display().to_string(),
        source,
    })?;
    let snapshot = Snapshot::from_json(&text)?;

    tracing::info!(items = snapshot.items.len(), path = %input.display(), "loaded snapshot");

    let derived = Snapshot {
        items: derive_records(&snapshot.items),
    };
    let rendered = derived.to_row_json()?;

    std::fs::write(output, rendered).map_err(|source| DeriveError::Write {
        path: output.display().to_string(),
        source,
    })?;

    tracing::info!(
        items = derived.items.len(),
        path = %output.display(),
        "part numbers derived"
    );
    Ok(())
}
