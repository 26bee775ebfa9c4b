//! Lookup indexes over a snapshot's rows.

use std::collections::HashMap;
use std::sync::Arc;

use parts_model::{CanonicalRow, Snapshot};
use tracing::debug;

type KindKey = (String, String, String);

fn kind_key(manufacturer: &str, item_category: &str, part_id: &str) -> KindKey {
    (
        manufacturer.trim().to_lowercase(),
        item_category.trim().to_lowercase(),
        part_id.trim().to_string(),
    )
}

/// Rows of a snapshot indexed by code and by item kind.
///
/// Indexes hold row positions; candidates come back in snapshot order.
#[derive(Debug, Clone)]
pub struct PartsIndex {
    snapshot: Arc<Snapshot>,
    by_code: HashMap<String, Vec<usize>>,
    by_kind: HashMap<KindKey, Vec<usize>>,
}

impl PartsIndex {
    #[must_use]
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        let mut by_code: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_kind: HashMap<KindKey, Vec<usize>> = HashMap::new();

        for (position, row) in snapshot.rows.iter().enumerate() {
            let code = row.code.trim();
            if !code.is_empty() {
                by_code.entry(code.to_string()).or_default().push(position);
            }
            if !row.manufacturer.trim().is_empty() && !row.id.trim().is_empty() {
                by_kind
                    .entry(kind_key(&row.manufacturer, &row.item_category, &row.id))
                    .or_default()
                    .push(position);
            }
        }

        debug!(
            rows = snapshot.rows.len(),
            codes = by_code.len(),
            kinds = by_kind.len(),
            "indexed snapshot"
        );
        Self {
            snapshot,
            by_code,
            by_kind,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.rows.is_empty()
    }

    fn rows(&self, positions: Option<&Vec<usize>>) -> Vec<&CanonicalRow> {
        positions
            .into_iter()
            .flatten()
            .filter_map(|position| self.snapshot.rows.get(*position))
            .collect()
    }

    /// Rows whose code equals `code` exactly.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Vec<&CanonicalRow> {
        self.rows(self.by_code.get(code.trim()))
    }

    /// Rows matching a manufacturer, item category and part id.
    ///
    /// Manufacturer and category compare case-insensitively.
    #[must_use]
    pub fn by_kind(
        &self,
        manufacturer: &str,
        item_category: &str,
        part_id: &str,
    ) -> Vec<&CanonicalRow> {
        self.rows(
            self.by_kind
                .get(&kind_key(manufacturer, item_category, part_id)),
        )
    }
}

impl From<Snapshot> for PartsIndex {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(Arc::new(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(source: &str, code: &str, manufacturer: &str, category: &str, id: &str) -> CanonicalRow {
        let mut row = CanonicalRow::new(source);
        row.code = code.to_string();
        row.manufacturer = manufacturer.to_string();
        row.item_category = category.to_string();
        row.id = id.to_string();
        row
    }

    #[test]
    fn codes_and_kinds_are_indexed_in_order() {
        let index = PartsIndex::from(Snapshot::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![
                row("a", "{245:1}", "", "", ""),
                row("b", "{245:1}", "Daedalus", "Grenade", "1"),
                row("c", "", "daedalus", "grenade", "2"),
            ],
        ));
        let sources: Vec<&str> = index
            .by_code("{245:1}")
            .iter()
            .map(|r| r.source.as_str())
            .collect();
        assert_eq!(sources, vec!["a", "b"]);
        assert_eq!(index.by_kind("DAEDALUS", "Grenade", "2")[0].source, "c");
        assert!(index.by_kind("Daedalus", "Grenade", "3").is_empty());
        assert!(index.by_code("{1:1}").is_empty());
        assert_eq!(index.len(), 3);
    }
}
