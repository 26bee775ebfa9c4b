//! Raw record to canonical row.

use parts_ingest::{RawRecord, SourceTable};
use parts_model::{CanonicalColumn, CanonicalRow};

use crate::aliases::{alias_target, keyword_target};
use crate::code::synthesize_code;

/// Where a raw field name lands in the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderTarget {
    /// Exact canonical header; overwrites.
    Exact(CanonicalColumn),
    /// Alias, case-insensitive header or keyword match; fills only if empty.
    Fallback(CanonicalColumn),
    /// Kept verbatim among the row's extras.
    Extra(String),
}

impl HeaderTarget {
    /// Resolved column name as it appears in the merged column list.
    #[must_use]
    pub fn column_name(&self) -> &str {
        match self {
            Self::Exact(column) | Self::Fallback(column) => column.header(),
            Self::Extra(name) => name,
        }
    }
}

/// Resolves a raw field name: exact header, alias, case-insensitive header,
/// keyword fallback, in that order.
#[must_use]
pub fn resolve_header(name: &str) -> HeaderTarget {
    let name = name.trim();
    if let Some(column) = CanonicalColumn::from_header(name) {
        return HeaderTarget::Exact(column);
    }
    if let Some(column) = alias_target(name) {
        return HeaderTarget::Fallback(column);
    }
    if let Some(column) = CanonicalColumn::from_header_ignore_case(name) {
        return HeaderTarget::Fallback(column);
    }
    if let Some(column) = keyword_target(name) {
        return HeaderTarget::Fallback(column);
    }
    HeaderTarget::Extra(name.to_string())
}

fn stash_extra(row: &mut CanonicalRow, name: &str, value: &str) {
    row.extras
        .entry(name.to_string())
        .or_insert_with(|| value.to_string());
}

/// Normalizes one raw record from `source`.
///
/// Blank values are absent. The source name always comes from the caller; a
/// raw `source` field is ignored. A raw `code` value wins over the synthesized
/// one. A fallback whose target is already filled keeps its value in
/// `extras` instead of dropping it.
#[must_use]
pub fn normalize_record(record: &RawRecord, source: &str) -> CanonicalRow {
    let mut row = CanonicalRow::new(source);
    row.code = synthesize_code(record);

    for (raw_name, raw_value) in record.iter() {
        let name = raw_name.trim();
        let value = raw_value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        match resolve_header(name) {
            HeaderTarget::Exact(CanonicalColumn::Source)
            | HeaderTarget::Fallback(CanonicalColumn::Source) => {}
            HeaderTarget::Exact(column) => *row.slot_mut(column) = value.to_string(),
            HeaderTarget::Fallback(column) => {
                if row.has(column) {
                    stash_extra(&mut row, name, value);
                } else {
                    *row.slot_mut(column) = value.to_string();
                }
            }
            HeaderTarget::Extra(name) => stash_extra(&mut row, &name, value),
        }
    }
    row
}

/// Looks a field up on a normalized row by its raw name.
///
/// Extras are consulted first; otherwise the name is resolved through the
/// same rules the normalizer used, so `Part_ID` finds the canonical `ID`.
#[must_use]
pub fn lookup_field<'a>(row: &'a CanonicalRow, name: &str) -> Option<&'a str> {
    if let Some(value) = row.extras.get(name) {
        return Some(value);
    }
    match resolve_header(name) {
        HeaderTarget::Exact(column) | HeaderTarget::Fallback(column) => Some(row.get(column)),
        HeaderTarget::Extra(_) => None,
    }
}

/// A source table after normalization.
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    pub name: String,
    pub origin: String,
    /// Resolved column names, first-seen order, `source` first.
    pub columns: Vec<String>,
    /// Raw header names as they appeared in the source.
    pub raw_columns: Vec<String>,
    pub rows: Vec<CanonicalRow>,
}

fn push_unique(columns: &mut Vec<String>, name: &str) {
    if !columns.iter().any(|c| c == name) {
        columns.push(name.to_string());
    }
}

/// Normalizes every non-blank record of a source table.
#[must_use]
pub fn normalize_table(table: &SourceTable) -> NormalizedSource {
    let rows: Vec<CanonicalRow> = table
        .records
        .iter()
        .filter(|record| !record.is_blank())
        .map(|record| normalize_record(record, &table.name))
        .collect();

    let mut columns = vec![CanonicalColumn::Source.header().to_string()];
    if rows.iter().any(|row| row.has(CanonicalColumn::Code)) {
        push_unique(&mut columns, CanonicalColumn::Code.header());
    }
    for header in &table.headers {
        push_unique(&mut columns, resolve_header(header).column_name());
    }

    NormalizedSource {
        name: table.name.clone(),
        origin: table.origin.clone(),
        columns,
        raw_columns: table.headers.clone(),
        rows,
    }
}
