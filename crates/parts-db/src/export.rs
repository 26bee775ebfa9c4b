//! Schema-driven re-export of per-category reference tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use parts_map::lookup_field;
use parts_model::CanonicalRow;
use tracing::{debug, info};

use crate::error::RefreshError;

/// Shape of one category table the item editors read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySchema {
    pub name: &'static str,
    /// Location relative to the export root.
    pub relpath: &'static str,
    /// Columns that must all be available for the table to be written.
    pub required: &'static [&'static str],
    /// Output column order.
    pub order: &'static [&'static str],
    /// Rows missing any of these values are left out.
    pub filter_nonempty: &'static [&'static str],
}

const WEAPON_COLUMNS: &[&str] = &[
    "Manufacturer & Weapon Type ID",
    "Manufacturer",
    "Weapon Type",
    "Part ID",
    "Part Type",
    "String",
    "Stat",
];

const fn main_perk(
    name: &'static str,
    relpath: &'static str,
    columns: &'static [&'static str],
) -> CategorySchema {
    CategorySchema {
        name,
        relpath,
        required: columns,
        order: columns,
        filter_nonempty: &["Part_ID", "Stat"],
    }
}

const fn manufacturer_perk(name: &'static str, relpath: &'static str) -> CategorySchema {
    CategorySchema {
        name,
        relpath,
        required: &["Manufacturer ID", "Part_ID", "Part_type", "Stat"],
        order: &["Manufacturer ID", "Part_ID", "Part_type", "Stat", "Description"],
        filter_nonempty: &["Part_ID", "Stat"],
    }
}

/// Every category table known to the exporter.
pub const CATEGORY_SCHEMAS: &[CategorySchema] = &[
    CategorySchema {
        name: "weapon_parts",
        relpath: "weapon_edit/all_weapon_part.csv",
        required: WEAPON_COLUMNS,
        order: WEAPON_COLUMNS,
        filter_nonempty: &["Part ID", "String"],
    },
    CategorySchema {
        name: "weapon_parts_en",
        relpath: "weapon_edit/all_weapon_part_EN.csv",
        required: WEAPON_COLUMNS,
        order: WEAPON_COLUMNS,
        filter_nonempty: &["Part ID", "String"],
    },
    main_perk(
        "grenade_main_perk",
        "grenade/grenade_main_perk.csv",
        &["Grenade_perk_main_ID", "Part_ID", "Part_type", "Stat"],
    ),
    manufacturer_perk("grenade_mrp", "grenade/manufacturer_rarity_perk.csv"),
    main_perk(
        "shield_main_perk",
        "shield/shield_main_perk.csv",
        &["Shield_perk_main_ID", "Part_ID", "Part_type", "Stat"],
    ),
    manufacturer_perk("shield_manufacturer_perk", "shield/manufacturer_perk.csv"),
    main_perk(
        "repkit_main_perk",
        "repkit/repkit_main_perk.csv",
        &["Repkit_perk_main_ID", "Part_ID", "Part_type", "Stat"],
    ),
    manufacturer_perk("repkit_manufacturer_perk", "repkit/repkit_manufacturer_perk.csv"),
    main_perk(
        "heavy_main_perk",
        "heavy/heavy_main_perk.csv",
        &["Heavy_perk_main_ID", "Part_ID", "Part_type", "Stat"],
    ),
    manufacturer_perk("heavy_manufacturer_perk", "heavy/heavy_manufacturer_perk.csv"),
];

impl CategorySchema {
    /// Whether every required column is among `available`.
    #[must_use]
    pub fn applies_to(&self, available: &[String]) -> bool {
        self.required
            .iter()
            .all(|required| available.iter().any(|c| c == required))
    }

    fn keeps(&self, row: &CanonicalRow) -> bool {
        self.filter_nonempty
            .iter()
            .all(|field| lookup_field(row, field).is_some_and(|v| !v.trim().is_empty()))
    }

    fn write(&self, path: &Path, rows: &[CanonicalRow]) -> Result<usize, RefreshError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RefreshError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let export_error = |e: csv::Error| RefreshError::Export {
            path: path.to_path_buf(),
            source: e,
        };

        let mut writer = csv::Writer::from_path(path).map_err(export_error)?;
        writer.write_record(self.order).map_err(export_error)?;
        let mut count = 0;
        for row in rows.iter().filter(|row| self.keeps(row)) {
            let record = self
                .order
                .iter()
                .map(|column| lookup_field(row, column).unwrap_or_default());
            writer.write_record(record).map_err(export_error)?;
            count += 1;
        }
        writer.flush().map_err(|e| RefreshError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(count)
    }
}

/// Writes every category table whose required columns are all available.
///
/// Returns the row count written per table name; tables whose shape does
/// not match the merged columns are skipped.
pub fn export_categories(
    root: &Path,
    available: &[String],
    rows: &[CanonicalRow],
) -> Result<BTreeMap<String, usize>, RefreshError> {
    let mut written = BTreeMap::new();
    for schema in CATEGORY_SCHEMAS {
        if !schema.applies_to(available) {
            debug!(table = schema.name, "category shape not available, skipped");
            continue;
        }
        let path = root.join(schema.relpath);
        let count = schema.write(&path, rows)?;
        info!(table = schema.name, rows = count, path = %path.display(), "exported category table");
        written.insert(schema.name.to_string(), count);
    }
    Ok(written)
}
