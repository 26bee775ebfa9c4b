//! Raw records and per-source loading.

use std::path::{Path, PathBuf};

use parts_model::SourceFailure;
use tracing::{debug, warn};

use crate::csv_table::read_csv_table;
use crate::error::{IngestError, Result};
use crate::json_rows::read_json_rows;

/// One input record: field name to value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// True when every value is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.trim().is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Shape of a source on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Detects the format from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// All records of one loaded source.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Logical source name (file stem for local sources).
    pub name: String,
    /// Where the source was read from.
    pub origin: String,
    /// Field names in first-seen order.
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl SourceTable {
    #[must_use]
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            headers: Vec::new(),
            records: Vec::new(),
        }
    }
}

/// Sources that loaded plus the ones that did not.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tables: Vec<SourceTable>,
    pub failures: Vec<SourceFailure>,
}

/// Loads one source file, picking the reader by extension.
pub fn load_source(path: &Path, name: &str) -> Result<SourceTable> {
    let format = SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let mut table = match format {
        SourceFormat::Csv => read_csv_table(path)?,
        SourceFormat::Json => read_json_rows(path)?,
    };
    table.name = name.to_string();
    debug!(
        source = %name,
        path = %path.display(),
        records = table.records.len(),
        "loaded source"
    );
    Ok(table)
}

/// Loads every `(name, path)` source in order.
///
/// A source that fails is logged, recorded in [`LoadOutcome::failures`] and
/// skipped; the remaining sources still load.
pub fn load_sources(sources: &[(String, PathBuf)]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    for (name, path) in sources {
        match load_source(path, name) {
            Ok(table) => outcome.tables.push(table),
            Err(error) => {
                warn!(source = %name, path = %path.display(), %error, "skipping source");
                outcome.failures.push(SourceFailure {
                    name: name.clone(),
                    origin: path.display().to_string(),
                    reason: error.to_string(),
                });
            }
        }
    }
    outcome
}
