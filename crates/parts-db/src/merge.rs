//! Union of normalized sources with deterministic deduplication.

use std::collections::HashMap;

use parts_map::NormalizedSource;
use parts_model::{CanonicalColumn, CanonicalRow, SourceOrigin};
use tracing::debug;

/// Which pipeline is merging; the full build applies extra row rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Offline full build: drops content-less rows and backfills `{ID}` codes.
    Builder,
    /// Incremental update: rows are kept as fetched.
    Updater,
}

/// Dedup key chosen once per merge from the merged column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPolicy {
    Code,
    /// Token column, first-seen spelling; rows match it regardless of case.
    Token(String),
    IdAndPartType,
    /// No reliable key: every row is kept.
    Unkeyed,
}

impl KeyPolicy {
    /// Picks the policy: `code`, then a `token` column, then `ID` with
    /// `Part Type`, else none.
    #[must_use]
    pub fn select(columns: &[String]) -> Self {
        let has = |name: &str| columns.iter().any(|c| c == name);
        if has(CanonicalColumn::Code.header()) {
            return Self::Code;
        }
        if let Some(token) = columns.iter().find(|c| c.eq_ignore_ascii_case("token")) {
            return Self::Token(token.clone());
        }
        if has(CanonicalColumn::Id.header()) && has(CanonicalColumn::PartType.header()) {
            return Self::IdAndPartType;
        }
        Self::Unkeyed
    }

    /// Column names the key is built from.
    #[must_use]
    pub fn key_fields(&self) -> Vec<String> {
        match self {
            Self::Code => vec![CanonicalColumn::Code.header().to_string()],
            Self::Token(name) => vec![name.clone()],
            Self::IdAndPartType => vec![
                CanonicalColumn::Id.header().to_string(),
                CanonicalColumn::PartType.header().to_string(),
            ],
            Self::Unkeyed => Vec::new(),
        }
    }

    /// Dedup key of a row, lowercased; `None` means the row passes through.
    #[must_use]
    pub fn row_key(&self, row: &CanonicalRow) -> Option<String> {
        let key = match self {
            Self::Code => row.code.trim().to_lowercase(),
            Self::Token(name) => row
                .field_ignore_case(name)
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_default(),
            Self::IdAndPartType => {
                let id = row.id.trim();
                let part_type = row.part_type.trim();
                if id.is_empty() || part_type.is_empty() {
                    return None;
                }
                format!("{id}|{part_type}").to_lowercase()
            }
            Self::Unkeyed => return None,
        };
        (!key.is_empty()).then_some(key)
    }
}

/// Result of merging every loaded source.
#[derive(Debug, Clone)]
pub struct MergedTable {
    pub sources: Vec<SourceOrigin>,
    /// Resolved columns: `source`, `code` when present, then first seen.
    pub columns: Vec<String>,
    /// Raw header names across all sources, first seen.
    pub raw_columns: Vec<String>,
    pub key: KeyPolicy,
    pub rows: Vec<CanonicalRow>,
}

impl MergedTable {
    #[must_use]
    pub fn key_fields(&self) -> Vec<String> {
        self.key.key_fields()
    }

    /// Every column name a category export may ask for.
    #[must_use]
    pub fn available_columns(&self) -> Vec<String> {
        let mut available = self.columns.clone();
        for name in &self.raw_columns {
            push_unique(&mut available, name);
        }
        available
    }
}

fn push_unique(columns: &mut Vec<String>, name: &str) {
    if !name.is_empty() && !columns.iter().any(|c| c == name) {
        columns.push(name.to_string());
    }
}

/// Merges normalized sources in load order.
///
/// Rows sharing a key keep the one with the higher completeness score; ties
/// go to the row seen first. Rows without a key pass through untouched.
/// Output is passthrough rows in load order followed by the winners in
/// first-seen key order, so equal inputs always give equal output.
#[must_use]
pub fn merge_sources(sources: &[NormalizedSource], mode: MergeMode) -> MergedTable {
    let mut columns = vec![CanonicalColumn::Source.header().to_string()];
    let mut raw_columns = Vec::new();
    for source in sources {
        for column in &source.columns {
            push_unique(&mut columns, column);
        }
        for column in &source.raw_columns {
            push_unique(&mut raw_columns, column);
        }
    }

    let key = KeyPolicy::select(&columns);
    debug!(?key, columns = columns.len(), "selected dedup key");

    let rows = sources.iter().flat_map(|source| source.rows.iter()).filter(|row| match mode {
        MergeMode::Builder => row.has_content(),
        MergeMode::Updater => true,
    });

    let mut seen = 0usize;
    let mut passthrough: Vec<CanonicalRow> = Vec::new();
    let mut winners: Vec<CanonicalRow> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for row in rows {
        seen += 1;
        let Some(row_key) = key.row_key(row) else {
            passthrough.push(row.clone());
            continue;
        };
        match slots.get(&row_key) {
            Some(&slot) => {
                if row.completeness() > winners[slot].completeness() {
                    winners[slot] = row.clone();
                }
            }
            None => {
                slots.insert(row_key, winners.len());
                winners.push(row.clone());
            }
        }
    }

    let mut merged = passthrough;
    merged.extend(winners);

    if mode == MergeMode::Builder {
        backfill_codes(&mut merged, &mut columns);
    }

    debug!(rows = merged.len(), duplicates = seen - merged.len(), "merged sources");

    MergedTable {
        sources: sources
            .iter()
            .map(|s| SourceOrigin::new(&s.name, &s.origin))
            .collect(),
        columns,
        raw_columns,
        key,
        rows: merged,
    }
}

/// Gives rows that have an `ID` but no code the code `{ID}`.
///
/// Runs after dedup, so a backfilled row is never collapsed.
fn backfill_codes(rows: &mut [CanonicalRow], columns: &mut Vec<String>) {
    let mut filled = false;
    for row in rows.iter_mut() {
        if !row.has(CanonicalColumn::Code) && row.has(CanonicalColumn::Id) {
            row.code = format!("{{{}}}", row.id.trim());
            filled = true;
        }
    }
    let code = CanonicalColumn::Code.header();
    if filled && !columns.iter().any(|c| c == code) {
        columns.insert(1, code.to_string());
    }
}
