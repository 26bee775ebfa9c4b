//! Resolution of part references to display information.

use parts_model::{CanonicalRow, PartCategory, PartReference};
use serde::Serialize;
use tracing::trace;

use crate::aggregate::{AggregateRow, aggregate};
use crate::grammar::parse_references;
use crate::index::PartsIndex;
use crate::sections::SectionPrefixes;
use crate::tables::{ElementalTable, SkinNames};
use crate::type_table::item_kind;

/// Extra column preferred over `Stats` when it carries a value.
pub const LEVEL_STATS_COLUMN: &str = "Stats (Level 50, Common)";

/// Display information for one reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedPart {
    pub part_type: String,
    pub display: String,
    pub stats: String,
    pub code: String,
}

impl ResolvedPart {
    pub const UNKNOWN: &'static str = "Unknown";

    fn unknown(reference: &PartReference) -> Self {
        Self {
            part_type: Self::UNKNOWN.to_string(),
            display: reference.raw.clone(),
            stats: String::new(),
            code: reference.code(),
        }
    }

    fn from_row(row: &CanonicalRow, reference: &PartReference) -> Self {
        let part_type = non_blank(&row.part_type).unwrap_or("Part");
        let display = non_blank(&row.display_string)
            .or_else(|| non_blank(&row.model_name))
            .map_or_else(|| format!("ID {}", reference.part_id), str::to_string);
        let stats = row
            .extras
            .get(LEVEL_STATS_COLUMN)
            .and_then(|stats| non_blank(stats))
            .or_else(|| non_blank(&row.stats))
            .unwrap_or_default();
        Self {
            part_type: part_type.to_string(),
            display,
            stats: stats.to_string(),
            code: reference.code(),
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.part_type == Self::UNKNOWN
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Resolves references against a parts index and the side tables.
#[derive(Debug, Clone)]
pub struct Resolver {
    index: PartsIndex,
    elemental: ElementalTable,
    skins: SkinNames,
    sections: SectionPrefixes,
}

impl Resolver {
    /// A resolver with empty side tables and the default sections.
    #[must_use]
    pub fn new(index: PartsIndex) -> Self {
        Self {
            index,
            elemental: ElementalTable::default(),
            skins: SkinNames::default(),
            sections: SectionPrefixes::default(),
        }
    }

    #[must_use]
    pub fn with_elemental(mut self, elemental: ElementalTable) -> Self {
        self.elemental = elemental;
        self
    }

    #[must_use]
    pub fn with_skin_names(mut self, skins: SkinNames) -> Self {
        self.skins = skins;
        self
    }

    #[must_use]
    pub fn with_sections(mut self, sections: SectionPrefixes) -> Self {
        self.sections = sections;
        self
    }

    #[must_use]
    pub fn index(&self) -> &PartsIndex {
        &self.index
    }

    #[must_use]
    pub fn sections(&self) -> &SectionPrefixes {
        &self.sections
    }

    /// Rows that could describe a reference, most specific lookup first.
    fn candidates(&self, reference: &PartReference) -> Vec<&CanonicalRow> {
        let code = reference.code();
        let mut rows = self.index.by_code(&code);
        if rows.is_empty() && reference.raw.trim() != code {
            rows = self.index.by_code(&reference.raw);
        }
        if rows.is_empty()
            && let Some((manufacturer, item_type)) = item_kind(reference.type_id)
        {
            rows = self
                .index
                .by_kind(manufacturer, item_type, &reference.part_id.to_string());
        }
        rows
    }

    /// Resolves one reference.
    ///
    /// Skins resolve through the skin names and element references through the
    /// elemental table. Everything else is looked up by code, then by raw
    /// text, then by item kind; `section` picks among several matches. No
    /// match gives an `Unknown` part showing the raw token.
    #[must_use]
    pub fn resolve(&self, reference: &PartReference, section: Option<&str>) -> ResolvedPart {
        match reference.category {
            PartCategory::Cosmetic => {
                return ResolvedPart {
                    part_type: "Skin".to_string(),
                    display: self.skins.label(&reference.part_id),
                    stats: String::new(),
                    code: reference.raw.clone(),
                };
            }
            PartCategory::Elemental => {
                if let Some(name) = reference
                    .part_id
                    .as_number()
                    .and_then(|id| self.elemental.get(id))
                {
                    return ResolvedPart {
                        part_type: "Elemental".to_string(),
                        display: name.to_string(),
                        stats: String::new(),
                        code: reference.code(),
                    };
                }
            }
            PartCategory::Part => {}
        }

        let candidates = self.candidates(reference);
        match self.sections.pick(&candidates, section) {
            Some(row) => ResolvedPart::from_row(row, reference),
            None => {
                trace!(code = %reference.code(), "unresolved reference");
                ResolvedPart::unknown(reference)
            }
        }
    }

    #[must_use]
    pub fn resolve_all(
        &self,
        references: &[PartReference],
        section: Option<&str>,
    ) -> Vec<ResolvedPart> {
        references
            .iter()
            .map(|reference| self.resolve(reference, section))
            .collect()
    }

    /// Parses a decoded item and folds its resolved parts into counted rows.
    #[must_use]
    pub fn resolve_decoded(&self, decoded: &str, section: Option<&str>) -> Vec<AggregateRow> {
        aggregate(self.resolve_all(&parse_references(decoded), section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_model::{PartId, Snapshot};

    fn resolver(rows: Vec<CanonicalRow>) -> Resolver {
        Resolver::new(PartsIndex::from(Snapshot::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            rows,
        )))
    }

    #[test]
    fn display_falls_back_through_model_name_and_id() {
        let mut named = CanonicalRow::new("parts");
        named.code = "{13:1}".to_string();
        named.model_name = "DAD_AR_Barrel_01".to_string();
        named.stats = "Damage +5%".to_string();
        named
            .extras
            .insert(LEVEL_STATS_COLUMN.to_string(), "Damage +12%".to_string());
        let mut bare = CanonicalRow::new("parts");
        bare.code = "{13:2}".to_string();

        let resolver = resolver(vec![named, bare]);
        let first = resolver.resolve(&PartReference::typed(13, 1), None);
        assert_eq!(first.part_type, "Part");
        assert_eq!(first.display, "DAD_AR_Barrel_01");
        assert_eq!(first.stats, "Damage +12%");
        let second = resolver.resolve(&PartReference::typed(13, 2), None);
        assert_eq!(second.display, "ID 2");
        assert_eq!(second.stats, "");
    }

    #[test]
    fn item_kind_lookup_backs_up_missing_codes() {
        let mut row = CanonicalRow::new("grenades");
        row.manufacturer = "Daedalus".to_string();
        row.item_category = "Grenade".to_string();
        row.id = "4".to_string();
        row.display_string = "Sticky".to_string();

        let resolved = resolver(vec![row]).resolve(&PartReference::typed(270, 4), None);
        assert_eq!(resolved.display, "Sticky");
        assert_eq!(resolved.code, "{270:4}");
    }

    #[test]
    fn unknown_keeps_the_raw_token() {
        let references = parse_references("270|| {9} |");
        let resolved = resolver(Vec::new()).resolve(&references[0], None);
        assert!(resolved.is_unknown());
        assert_eq!(resolved.display, "{9}");
        assert_eq!(resolved.code, "{270:9}");
    }

    #[test]
    fn elements_and_skins_use_their_tables() {
        let elemental = ElementalTable::from_table(
            &parts_ingest::parse_csv_text("Part_ID,Stat\n5,Corrosive\n", "e.csv").unwrap(),
        );
        let skins = SkinNames::from_value(&serde_json::json!({"17": "Bloodstarved"}));
        let resolver = resolver(Vec::new())
            .with_elemental(elemental)
            .with_skin_names(skins);

        let element = resolver.resolve(&PartReference::typed(1, 5), None);
        assert_eq!(
            (element.part_type.as_str(), element.display.as_str()),
            ("Elemental", "Corrosive")
        );
        assert!(resolver.resolve(&PartReference::typed(1, 6), None).is_unknown());

        let references = parse_references(r#"13|| "c", 17 | "c", 18 |"#);
        let skin = resolver.resolve(&references[0], None);
        assert_eq!(skin.part_type, "Skin");
        assert_eq!(skin.display, "Bloodstarved");
        assert_eq!(skin.code, r#""c", 17"#);
        assert_eq!(references[1].part_id, PartId::Number(18));
        assert_eq!(resolver.resolve(&references[1], None).display, "Skin ID 18");
    }
}
