//! Snapshot persistence and the shared, swappable snapshot handle.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parts_model::Snapshot;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, SnapshotError};

/// Parses a snapshot document.
///
/// The document must be a JSON object holding a `rows` list; anything else
/// is a [`SnapshotError::Format`].
pub fn parse_snapshot(text: &str, path: &Path) -> Result<Snapshot> {
    let format_error = |reason: String| SnapshotError::Format {
        path: path.to_path_buf(),
        reason,
    };

    let value: Value = serde_json::from_str(text).map_err(|e| format_error(e.to_string()))?;
    if !value.get("rows").is_some_and(Value::is_array) {
        return Err(format_error("document has no `rows` list".to_string()));
    }
    serde_json::from_value(value).map_err(|e| format_error(e.to_string()))
}

/// Loads a snapshot from disk.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    let snapshot = parse_snapshot(&text, path)?;
    info!(path = %path.display(), rows = snapshot.len(), "loaded snapshot");
    Ok(snapshot)
}

/// Loads a snapshot, falling back to an empty one when the file is missing
/// or unreadable.
#[must_use]
pub fn load_snapshot_or_empty(path: &Path) -> Snapshot {
    if !path.exists() {
        return Snapshot::default();
    }
    match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable snapshot");
            Snapshot::default()
        }
    }
}

/// Writes a snapshot as pretty JSON.
///
/// The document is written to a temp file in the target directory and
/// persisted over the target, so readers never see a partial file.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    fs::create_dir_all(parent).map_err(|e| SnapshotError::Io {
        operation: "create directory for",
        path: parent.to_path_buf(),
        source: e,
    })?;

    let io_error = |operation: &'static str| {
        move |e: std::io::Error| SnapshotError::Io {
            operation,
            path: path.to_path_buf(),
            source: e,
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(io_error("create"))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, snapshot).map_err(|e| {
            SnapshotError::Serialization {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        writer.write_all(b"\n").map_err(io_error("write"))?;
        writer.flush().map_err(io_error("write"))?;
    }
    temp.as_file().sync_all().map_err(io_error("sync"))?;

    temp.persist(path)
        .map_err(|e| SnapshotError::AtomicWriteFailed {
            target_path: path.to_path_buf(),
            source: e.error,
        })?;

    info!(path = %path.display(), rows = snapshot.len(), "saved snapshot");
    Ok(())
}

/// Read-mostly handle to the current snapshot.
///
/// Readers take a cheap `Arc` of whatever snapshot is current; a rebuild
/// swaps in a new value without blocking them.
#[derive(Debug)]
pub struct SnapshotHandle {
    current: ArcSwap<Snapshot>,
}

impl SnapshotHandle {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Handle over the snapshot at `path`, or an empty one.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        Self::new(load_snapshot_or_empty(path))
    }

    /// The snapshot readers currently see.
    #[must_use]
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Publishes a new snapshot and returns the one it replaced.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        self.current.swap(Arc::new(snapshot))
    }
}

impl Default for SnapshotHandle {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
