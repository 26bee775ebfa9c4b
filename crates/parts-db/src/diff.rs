//! Row-level comparison between two builds.

use std::collections::BTreeMap;

use parts_model::{CanonicalRow, DiffSummary};
use sha2::{Digest, Sha256};

/// SHA-256 of a row's JSON form, hex encoded.
#[must_use]
pub fn row_hash(row: &CanonicalRow) -> String {
    let bytes = serde_json::to_vec(row).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

fn keyed_hashes(rows: &[CanonicalRow], key_fields: &[String]) -> BTreeMap<String, String> {
    rows.iter()
        .map(|row| {
            let hash = row_hash(row);
            let key = key_fields
                .iter()
                .map(|field| row.field_ignore_case(field).unwrap_or_default().trim())
                .collect::<Vec<_>>()
                .join(" | ");
            let key = key.trim();
            // Rows without a key are identified by their content.
            let key = if key.is_empty() || key == "|" {
                hash.clone()
            } else {
                key.to_string()
            };
            (key, hash)
        })
        .collect()
}

/// Counts rows added, removed and changed between `before` and `after`.
///
/// Rows are matched on `key_fields`; with no key fields, or for rows whose
/// key is blank, the full content hash is the identity, so an edit shows up
/// as one removal plus one addition.
#[must_use]
pub fn diff_rows(
    before: &[CanonicalRow],
    after: &[CanonicalRow],
    key_fields: &[String],
) -> DiffSummary {
    let old = keyed_hashes(before, key_fields);
    let new = keyed_hashes(after, key_fields);

    let added = new.keys().filter(|key| !old.contains_key(*key)).count();
    let removed = old.keys().filter(|key| !new.contains_key(*key)).count();
    let changed = new
        .iter()
        .filter(|(key, hash)| old.get(*key).is_some_and(|previous| previous != *hash))
        .count();

    DiffSummary {
        added,
        removed,
        changed,
    }
}
