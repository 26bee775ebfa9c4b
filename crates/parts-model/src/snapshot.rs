//! Persisted build of the merged parts database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::row::CanonicalRow;

/// Format of `generated_at` timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Where one contributing source came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOrigin {
    pub name: String,
    #[serde(default)]
    pub origin: String,
}

impl SourceOrigin {
    #[must_use]
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
        }
    }
}

/// One immutable build of the universal parts database.
///
/// Snapshots are never edited in place; a rebuild produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, alias = "generated_at_utc")]
    pub generated_at: String,
    #[serde(default)]
    pub sources: Vec<SourceOrigin>,
    #[serde(default)]
    pub columns: Vec<String>,
    /// Columns the dedup key was built from; empty when nothing was deduped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_fields: Vec<String>,
    pub rows: Vec<CanonicalRow>,
}

impl Snapshot {
    /// Snapshot stamped with the current time.
    #[must_use]
    pub fn new(
        sources: Vec<SourceOrigin>,
        columns: Vec<String>,
        key_fields: Vec<String>,
        rows: Vec<CanonicalRow>,
    ) -> Self {
        Self::generated(Utc::now(), sources, columns, key_fields, rows)
    }

    /// Snapshot stamped with an explicit generation time.
    #[must_use]
    pub fn generated(
        at: DateTime<Utc>,
        sources: Vec<SourceOrigin>,
        columns: Vec<String>,
        key_fields: Vec<String>,
        rows: Vec<CanonicalRow>,
    ) -> Self {
        Self {
            generated_at: at.format(TIMESTAMP_FORMAT).to_string(),
            sources,
            columns,
            key_fields,
            rows,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
