//! Editor sections and the source prefixes that disambiguate lookups.

use std::collections::BTreeMap;

use parts_model::CanonicalRow;
use serde::{Deserialize, Serialize};

/// Source-name prefixes preferred by each editor section.
///
/// Several category tables can carry the same code. When the caller names a
/// section, a candidate whose source equals a prefix, or starts with
/// `prefix_`, wins over the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionPrefixes(BTreeMap<String, Vec<String>>);

impl Default for SectionPrefixes {
    fn default() -> Self {
        let defaults: [(&str, &[&str]); 7] = [
            ("grenade", &["grenade_main_perk", "manufacturer_rarity_perk"]),
            ("shield", &["shield_main_perk", "manufacturer_perk"]),
            ("weapon_edit", &["all_weapon_part", "all_weapon_part_EN"]),
            ("repkit", &["repkit_main_perk", "repkit_manufacturer_perk"]),
            ("heavy", &["heavy_main_perk", "heavy_manufacturer_perk"]),
            ("enhancement", &["Enhancement_perk", "Enhancement_manufacturers"]),
            ("class_mod", &[]),
        ];
        Self(
            defaults
                .into_iter()
                .map(|(section, prefixes)| {
                    (
                        section.to_string(),
                        prefixes.iter().map(|p| (*p).to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl SectionPrefixes {
    /// A table with no sections.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces a section's prefixes.
    pub fn insert(&mut self, section: impl Into<String>, prefixes: Vec<String>) {
        self.0.insert(section.into(), prefixes);
    }

    /// Prefixes of a section; empty for unknown sections.
    #[must_use]
    pub fn prefixes(&self, section: &str) -> &[String] {
        self.0.get(section).map_or(&[], Vec::as_slice)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(section, prefixes)| (section.as_str(), prefixes.as_slice()))
    }

    /// Whether `source` belongs to one of the section's prefixes.
    #[must_use]
    pub fn matches(&self, section: &str, source: &str) -> bool {
        self.prefixes(section).iter().any(|prefix| {
            source == prefix
                || source
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('_'))
        })
    }

    /// Picks the row to display among candidates sharing a code.
    ///
    /// The first candidate from one of the section's sources wins; without a
    /// section or a match, the first candidate does.
    #[must_use]
    pub fn pick<'a>(
        &self,
        candidates: &[&'a CanonicalRow],
        section: Option<&str>,
    ) -> Option<&'a CanonicalRow> {
        section
            .and_then(|section| {
                candidates
                    .iter()
                    .find(|row| self.matches(section, &row.source))
                    .copied()
            })
            .or_else(|| candidates.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching_needs_a_word_boundary() {
        let sections = SectionPrefixes::default();
        assert!(sections.matches("shield", "shield_main_perk"));
        assert!(sections.matches("shield", "manufacturer_perk_2025"));
        assert!(!sections.matches("shield", "manufacturer_perks"));
        assert!(!sections.matches("class_mod", "anything"));
        assert!(!sections.matches("unknown", "shield_main_perk"));
    }

    #[test]
    fn pick_prefers_the_section_then_the_first_row() {
        let grenade = CanonicalRow::new("grenade_main_perk");
        let shield = CanonicalRow::new("shield_main_perk");
        let candidates = [&grenade, &shield];
        let sections = SectionPrefixes::default();

        assert_eq!(
            sections.pick(&candidates, Some("shield")).map(|r| r.source.as_str()),
            Some("shield_main_perk")
        );
        assert_eq!(
            sections.pick(&candidates, Some("heavy")).map(|r| r.source.as_str()),
            Some("grenade_main_perk")
        );
        assert_eq!(
            sections.pick(&candidates, None).map(|r| r.source.as_str()),
            Some("grenade_main_perk")
        );
        assert!(sections.pick(&[], Some("shield")).is_none());
    }
}
