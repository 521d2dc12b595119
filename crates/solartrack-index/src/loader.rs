//! Snapshot data file loading.
//!
//! The data file is a JSON array of GeoJSON feature collections, one per
//! snapshot. Each record's timestamp lives inside its first feature's
//! properties (see [`Snapshot::from_feature_collection`]).

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::error::MalformedInputError;
use crate::snapshot::Snapshot;

/// Errors that can occur while loading snapshot records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data file could not be read.
    #[error("failed to read snapshot file {}: {source}", .path.display())]
    Io {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The data file is not valid JSON.
    #[error("failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array of records.
    #[error("snapshot data must be a JSON array of feature collections")]
    NotAnArray,

    /// A record or the collection as a whole is invalid.
    #[error("malformed snapshot data: {0}")]
    Malformed(#[from] MalformedInputError),
}

/// Parse snapshot records from a JSON document.
///
/// Records keep their payload verbatim; their order in the document is
/// irrelevant because the index sorts on construction.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for invalid JSON, [`LoadError::NotAnArray`]
/// if the document is not an array, and [`LoadError::Malformed`] for the
/// first record whose timestamp is missing or not an integer.
pub fn parse_snapshots(json: &str) -> Result<Vec<Snapshot>, LoadError> {
    let Value::Array(records) = serde_json::from_str::<Value>(json)? else {
        return Err(LoadError::NotAnArray);
    };

    let snapshots = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| Snapshot::from_feature_collection(position, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(snapshots)
}

/// Read and parse snapshot records from the file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_snapshots`].
pub fn load_snapshots(path: &Path) -> Result<Vec<Snapshot>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshots = parse_snapshots(&contents)?;
    info!(
        path = %path.display(),
        records = snapshots.len(),
        "Snapshot records loaded"
    );
    Ok(snapshots)
}
