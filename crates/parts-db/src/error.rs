//! Error types for snapshot persistence and refresh runs.

use std::path::PathBuf;

use parts_model::SourceFailure;
use thiserror::Error;

/// Failure to read or write a snapshot document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File I/O error.
    #[error("failed to {operation} snapshot file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a snapshot (bad JSON or no `rows` list).
    #[error("invalid snapshot document {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    /// Serialization error.
    #[error("failed to serialize snapshot for {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file could not be persisted over the target.
    #[error("failed to replace snapshot file: {target_path}")]
    AtomicWriteFailed {
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Short message suitable for end users.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the parts database at {}", operation, path.display()),
            Self::Format { path, reason } => format!(
                "The file at {} is not a parts database: {}",
                path.display(),
                reason
            ),
            Self::Serialization { .. } => "The parts database could not be encoded.".to_string(),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "The parts database at {} could not be replaced; the previous file is untouched.",
                target_path.display()
            ),
        }
    }
}

/// Failure of a full build or incremental update.
///
/// Individual sources failing is not an error; those are listed in the
/// report. Only a run that loaded nothing at all fails.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("no source could be loaded ({} failed)", failures.len())]
    NoSources { failures: Vec<SourceFailure> },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("failed to write category table: {path}")]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
