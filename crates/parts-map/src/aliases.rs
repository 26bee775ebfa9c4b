//! Field-name tables consulted by the normalizer.
//!
//! Order matters in every table: the first applicable entry wins.

use parts_model::CanonicalColumn;

/// Alternate field names and the canonical column they fill.
pub const COLUMN_ALIASES: &[(&str, CanonicalColumn)] = &[
    ("Part_ID", CanonicalColumn::Id),
    ("Part ID", CanonicalColumn::Id),
    ("Part_type", CanonicalColumn::PartType),
    ("Item Type", CanonicalColumn::ItemCategory),
    ("Stat", CanonicalColumn::Stats),
    ("Stats (Level 50, Common)", CanonicalColumn::Stats),
    ("Description", CanonicalColumn::Stats),
    ("perk_name_EN", CanonicalColumn::Stats),
    ("Part String", CanonicalColumn::DisplayString),
    ("Name", CanonicalColumn::ModelName),
    ("manufacturers_name", CanonicalColumn::Manufacturer),
];

/// Substring fallbacks for field names no other rule recognizes.
pub const KEYWORD_FALLBACKS: &[(&str, CanonicalColumn)] = &[
    ("Stat", CanonicalColumn::Stats),
    ("Effect", CanonicalColumn::Effects),
];

/// Fields providing the type prefix of a `{prefix:part}` code.
pub const PREFIX_FIELDS: &[&str] = &[
    "Type ID",
    "Manufacturer & Weapon Type ID",
    "Grenade_perk_main_ID",
    "Shield_perk_main_ID",
    "Repkit_perk_main_ID",
    "Heavy_perk_main_ID",
    "Manufacturer ID",
    "manufacturers_ID",
];

/// Fields providing the part number of a code.
pub const PART_ID_FIELDS: &[&str] = &["ID", "Part ID", "Part_ID", "perk_ID"];

/// Canonical column an alias maps to.
#[must_use]
pub fn alias_target(name: &str) -> Option<CanonicalColumn> {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, column)| *column)
}

/// Canonical column a keyword fallback maps to.
#[must_use]
pub fn keyword_target(name: &str) -> Option<CanonicalColumn> {
    KEYWORD_FALLBACKS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, column)| *column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_is_exact() {
        assert_eq!(alias_target("Part_ID"), Some(CanonicalColumn::Id));
        assert_eq!(alias_target("part_id"), None);
    }

    #[test]
    fn keyword_fallback_prefers_stats() {
        assert_eq!(keyword_target("Base Stat Line"), Some(CanonicalColumn::Stats));
        assert_eq!(keyword_target("Side Effects"), Some(CanonicalColumn::Effects));
        assert_eq!(keyword_target("Rarity"), None);
    }
}
