//! Counting identical resolved parts.

use std::collections::HashMap;

use serde::Serialize;

use crate::resolver::ResolvedPart;

/// A resolved part with the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub quantity: usize,
    pub part_type: String,
    pub display: String,
    pub stats: String,
    pub code: String,
}

impl AggregateRow {
    /// `{qty}x {code} [{part type}] {display}`, with ` - {stats}` when set.
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = format!(
            "{}x {} [{}] {}",
            self.quantity, self.code, self.part_type, self.display
        );
        if !self.stats.is_empty() {
            line.push_str(" - ");
            line.push_str(&self.stats);
        }
        line
    }
}

/// Groups identical parts and counts them.
///
/// Rows sort by descending quantity, then part type, then display name.
/// Stats and code break any remaining tie so the order is total.
#[must_use]
pub fn aggregate(parts: impl IntoIterator<Item = ResolvedPart>) -> Vec<AggregateRow> {
    let mut counts: HashMap<ResolvedPart, usize> = HashMap::new();
    for part in parts {
        *counts.entry(part).or_default() += 1;
    }

    let mut rows: Vec<AggregateRow> = counts
        .into_iter()
        .map(|(part, quantity)| AggregateRow {
            quantity,
            part_type: part.part_type,
            display: part.display,
            stats: part.stats,
            code: part.code,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.part_type.cmp(&b.part_type))
            .then_with(|| a.display.cmp(&b.display))
            .then_with(|| a.stats.cmp(&b.stats))
            .then_with(|| a.code.cmp(&b.code))
    });
    rows
}

/// Text lines of aggregated rows, in order.
#[must_use]
pub fn render_lines(rows: &[AggregateRow]) -> Vec<String> {
    rows.iter().map(AggregateRow::line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(part_type: &str, display: &str, code: &str) -> ResolvedPart {
        ResolvedPart {
            part_type: part_type.to_string(),
            display: display.to_string(),
            stats: String::new(),
            code: code.to_string(),
        }
    }

    #[test]
    fn counts_then_sorts() {
        let rows = aggregate([
            part("Scope", "Red Dot", "{13:62}"),
            part("Barrel", "Long", "{13:83}"),
            part("Scope", "Red Dot", "{13:62}"),
            part("Barrel", "Short", "{13:84}"),
        ]);
        let summary: Vec<(usize, &str)> = rows
            .iter()
            .map(|r| (r.quantity, r.display.as_str()))
            .collect();
        assert_eq!(summary, vec![(2, "Red Dot"), (1, "Long"), (1, "Short")]);
    }

    #[test]
    fn lines_omit_empty_stats() {
        let mut rows = aggregate([part("Barrel", "Long", "{13:83}")]);
        assert_eq!(render_lines(&rows), vec!["1x {13:83} [Barrel] Long"]);
        rows[0].stats = "Damage +10%".to_string();
        assert_eq!(rows[0].line(), "1x {13:83} [Barrel] Long - Damage +10%");
    }
}
