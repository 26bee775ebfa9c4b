//! Result values of the batch build and incremental update operations.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A source that could not be loaded or fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub name: String,
    pub origin: String,
    pub reason: String,
}

/// Row-level difference between two merged tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.changed == 0
    }
}

/// Terminal result of a build or update run.
///
/// Partial success is reported here through `failures`; only a run where no
/// source could be loaded at all is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub updated: bool,
    pub rows_before: usize,
    pub rows_after: usize,
    pub diff: DiffSummary,
    pub failures: Vec<SourceFailure>,
    pub output: PathBuf,
    /// Category tables rewritten during the run, with their row counts.
    #[serde(default)]
    pub exports: BTreeMap<String, usize>,
}

impl RefreshReport {
    /// One-paragraph human summary of the run.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = format!(
            "Parts DB {}. Rows: {} -> {}. Added {}, removed {}, changed {}.",
            if self.updated { "updated" } else { "unchanged" },
            self.rows_before,
            self.rows_after,
            self.diff.added,
            self.diff.removed,
            self.diff.changed,
        );
        if !self.exports.is_empty() {
            let parts: Vec<String> = self
                .exports
                .iter()
                .map(|(name, count)| format!("{name}={count}"))
                .collect();
            message.push_str("\nCategory exports refreshed: ");
            message.push_str(&parts.join(", "));
        }
        if !self.failures.is_empty() {
            let names: Vec<&str> = self.failures.iter().map(|f| f.name.as_str()).collect();
            message.push_str("\nFailed sources: ");
            message.push_str(&names.join(", "));
        }
        message
    }
}
