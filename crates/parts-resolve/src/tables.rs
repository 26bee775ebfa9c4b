//! Side tables consulted during resolution: element names and skin names.

use std::collections::HashMap;
use std::path::Path;

use parts_ingest::{SourceTable, read_csv_table, read_json_document};
use parts_model::PartId;
use serde_json::Value;
use tracing::debug;

/// Element names by part id, for type-1 references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementalTable {
    names: HashMap<u32, String>,
}

impl ElementalTable {
    /// Builds the table from `Part_ID` and `Stat` columns.
    ///
    /// Rows with a non-numeric id or a blank name are ignored.
    #[must_use]
    pub fn from_table(table: &SourceTable) -> Self {
        let names: HashMap<u32, String> = table
            .records
            .iter()
            .filter_map(|record| {
                let id = record.get("Part_ID")?.trim().parse().ok()?;
                let name = record.get("Stat")?.trim();
                (!name.is_empty()).then(|| (id, name.to_string()))
            })
            .collect();
        debug!(entries = names.len(), "loaded elemental table");
        Self { names }
    }

    /// Loads the table from a CSV file.
    pub fn load(path: &Path) -> parts_ingest::Result<Self> {
        read_csv_table(path).map(|table| Self::from_table(&table))
    }

    #[must_use]
    pub fn get(&self, part_id: u32) -> Option<&str> {
        self.names.get(&part_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Display names of skins, keyed by the value of a cosmetic token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinNames {
    names: HashMap<String, String>,
}

impl SkinNames {
    /// Reads a JSON object mapping skin ids to names.
    ///
    /// Anything other than an object yields an empty table. Blank names are
    /// dropped.
    #[must_use]
    pub fn from_value(document: &Value) -> Self {
        let Some(object) = document.as_object() else {
            return Self::default();
        };
        let names = object
            .iter()
            .filter_map(|(id, name)| {
                let name = match name {
                    Value::String(text) => text.trim().to_string(),
                    Value::Number(number) => number.to_string(),
                    _ => return None,
                };
                (!name.is_empty()).then(|| (id.trim().to_string(), name))
            })
            .collect();
        Self { names }
    }

    pub fn load(path: &Path) -> parts_ingest::Result<Self> {
        read_json_document(path).map(|document| Self::from_value(&document))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Configured name of a skin, or `Skin ID <value>`.
    #[must_use]
    pub fn label(&self, value: &PartId) -> String {
        let id = value.to_string();
        match self.get(&id) {
            Some(name) => name.to_string(),
            None => format!("Skin ID {id}"),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_ingest::parse_csv_text;
    use serde_json::json;

    #[test]
    fn elemental_rows_need_an_id_and_a_name() {
        let table = parse_csv_text(
            "Part_ID,Stat\n10,Fire\n11,\nx,Cryo\n12, Shock \n",
            "elemental.csv",
        )
        .unwrap();
        let elemental = ElementalTable::from_table(&table);
        assert_eq!(elemental.len(), 2);
        assert_eq!(elemental.get(10), Some("Fire"));
        assert_eq!(elemental.get(12), Some("Shock"));
        assert_eq!(elemental.get(11), None);
    }

    #[test]
    fn skin_labels_fall_back_to_the_id() {
        let skins = SkinNames::from_value(&json!({
            "17": "Bloodstarved",
            "Cosmetics_Weapon_Shiny_Ultimate": "Ultimate Shiny",
            "18": "  ",
            "19": null
        }));
        assert_eq!(skins.len(), 2);
        assert_eq!(skins.label(&PartId::Number(17)), "Bloodstarved");
        assert_eq!(
            skins.label(&PartId::Text("Cosmetics_Weapon_Shiny_Ultimate".to_string())),
            "Ultimate Shiny"
        );
        assert_eq!(skins.label(&PartId::Number(18)), "Skin ID 18");
        assert!(SkinNames::from_value(&json!([1, 2])).is_empty());
    }
}
