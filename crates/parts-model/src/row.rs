//! The merged database row.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::column::CanonicalColumn;

/// One entry of the universal parts database.
///
/// Canonical fields are always present (empty when unknown). Raw fields that
/// did not land in a canonical column are kept in `extras` so that category
/// tables can be re-exported in their original shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    #[serde(default, deserialize_with = "cell_text")]
    pub source: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub code: String,
    #[serde(rename = "Manufacturer", default, deserialize_with = "cell_text")]
    pub manufacturer: String,
    #[serde(rename = "Weapon Type", default, deserialize_with = "cell_text")]
    pub item_category: String,
    #[serde(rename = "ID", default, deserialize_with = "cell_text")]
    pub id: String,
    #[serde(rename = "Part Type", default, deserialize_with = "cell_text")]
    pub part_type: String,
    #[serde(rename = "String", default, deserialize_with = "cell_text")]
    pub display_string: String,
    #[serde(rename = "Model Name", default, deserialize_with = "cell_text")]
    pub model_name: String,
    #[serde(rename = "Stats", default, deserialize_with = "cell_text")]
    pub stats: String,
    #[serde(rename = "Effects", default, deserialize_with = "cell_text")]
    pub effects: String,
    #[serde(rename = "Requirements", default, deserialize_with = "cell_text")]
    pub requirements: String,
    #[serde(flatten, default, deserialize_with = "cell_text_map")]
    pub extras: BTreeMap<String, String>,
}

/// A stored cell. Numbers and booleans read as their text, `null` and
/// nested values as empty, so one odd value cannot reject a whole snapshot.
struct Cell(String);

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a text, number, boolean or null cell")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Cell, E> {
        Ok(Cell(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Cell, E> {
        Ok(Cell(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Cell, E> {
        Ok(Cell(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Cell, E> {
        Ok(Cell(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Cell, E> {
        Ok(Cell(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Cell, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
            Ok(Cell(format!("{v:.0}")))
        } else {
            Ok(Cell(v.to_string()))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell(String::new()))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Cell, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Cell, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Cell(String::new()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Cell, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Cell(String::new()))
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

fn cell_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Cell::deserialize(deserializer).map(|cell| cell.0)
}

fn cell_text_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let cells = BTreeMap::<String, Cell>::deserialize(deserializer)?;
    Ok(cells.into_iter().map(|(name, cell)| (name, cell.0)).collect())
}

impl CanonicalRow {
    /// Creates an empty row tagged with its source name.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Value of a canonical column.
    #[must_use]
    pub fn get(&self, column: CanonicalColumn) -> &str {
        match column {
            CanonicalColumn::Source => &self.source,
            CanonicalColumn::Code => &self.code,
            CanonicalColumn::Manufacturer => &self.manufacturer,
            CanonicalColumn::ItemCategory => &self.item_category,
            CanonicalColumn::Id => &self.id,
            CanonicalColumn::PartType => &self.part_type,
            CanonicalColumn::DisplayString => &self.display_string,
            CanonicalColumn::ModelName => &self.model_name,
            CanonicalColumn::Stats => &self.stats,
            CanonicalColumn::Effects => &self.effects,
            CanonicalColumn::Requirements => &self.requirements,
        }
    }

    /// Mutable slot of a canonical column.
    pub fn slot_mut(&mut self, column: CanonicalColumn) -> &mut String {
        match column {
            CanonicalColumn::Source => &mut self.source,
            CanonicalColumn::Code => &mut self.code,
            CanonicalColumn::Manufacturer => &mut self.manufacturer,
            CanonicalColumn::ItemCategory => &mut self.item_category,
            CanonicalColumn::Id => &mut self.id,
            CanonicalColumn::PartType => &mut self.part_type,
            CanonicalColumn::DisplayString => &mut self.display_string,
            CanonicalColumn::ModelName => &mut self.model_name,
            CanonicalColumn::Stats => &mut self.stats,
            CanonicalColumn::Effects => &mut self.effects,
            CanonicalColumn::Requirements => &mut self.requirements,
        }
    }

    /// Whether a canonical column holds a non-blank value.
    #[must_use]
    pub fn has(&self, column: CanonicalColumn) -> bool {
        !self.get(column).trim().is_empty()
    }

    /// Number of canonical fields with non-empty values.
    #[must_use]
    pub fn completeness(&self) -> usize {
        CanonicalColumn::ALL
            .into_iter()
            .filter(|column| self.has(*column))
            .count()
    }

    /// True when any canonical field other than `source` and `code` is set.
    #[must_use]
    pub fn has_content(&self) -> bool {
        CanonicalColumn::ALL
            .into_iter()
            .filter(|column| !matches!(column, CanonicalColumn::Source | CanonicalColumn::Code))
            .any(|column| self.has(column))
    }

    /// Looks a field up by header: canonical headers first, then extras.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match CanonicalColumn::from_header(name) {
            Some(column) => Some(self.get(column)),
            None => self.extras.get(name).map(String::as_str),
        }
    }

    /// Like [`field`](Self::field), but an extra spelled with other casing
    /// also matches, so `token` and `Token` name the same field.
    #[must_use]
    pub fn field_ignore_case(&self, name: &str) -> Option<&str> {
        self.field(name).or_else(|| {
            self.extras
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}
