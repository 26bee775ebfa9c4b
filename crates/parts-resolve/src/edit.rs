//! Reference-list edits and regeneration of the decoded text.

use parts_model::PartReference;

use crate::grammar::BODY_SEPARATOR;

/// Swaps the reference at `index` with its predecessor.
///
/// Returns `false`, leaving the list untouched, when there is nothing to move.
pub fn move_up(references: &mut [PartReference], index: usize) -> bool {
    if index == 0 || index >= references.len() {
        return false;
    }
    references.swap(index - 1, index);
    true
}

/// Swaps the reference at `index` with its successor.
pub fn move_down(references: &mut [PartReference], index: usize) -> bool {
    if index + 1 >= references.len() {
        return false;
    }
    references.swap(index, index + 1);
    true
}

/// Removes and returns the reference at `index`, if any.
pub fn delete_reference(
    references: &mut Vec<PartReference>,
    index: usize,
) -> Option<PartReference> {
    (index < references.len()).then(|| references.remove(index))
}

/// Writes a decoded item back from its header and references.
///
/// Tokens keep their raw text and are joined by single spaces, so parsing the
/// result under the same header yields the same references.
#[must_use]
pub fn rebuild_decoded(header: &str, references: &[PartReference]) -> String {
    let body = references
        .iter()
        .map(|reference| reference.raw.trim())
        .filter(|raw| !raw.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}{BODY_SEPARATOR} {body} |", header.trim())
}

/// Appends a cosmetic token naming `skin` to a decoded item.
///
/// An unterminated stream is closed with ` |` before the token is added, so
/// nothing after the last `|` is lost. Returns `None` for blank input.
#[must_use]
pub fn apply_skin(decoded: &str, skin: &str) -> Option<String> {
    let decoded = decoded.trim();
    if decoded.is_empty() {
        return None;
    }
    let escaped = skin.trim().replace('\\', "\\\\").replace('"', "\\\"");
    let token = format!("\"c\", \"{escaped}\" |");
    if decoded.ends_with('|') {
        Some(format!("{decoded} {token}"))
    } else {
        Some(format!("{decoded} | {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{parse_decoded, parse_references};
    use parts_model::{PartId, PartToken};

    const ITEM: &str = "270, 0, 1, 50| 2, 969|| {83} {82} {62} |";

    fn raws(references: &[PartReference]) -> Vec<&str> {
        references.iter().map(|r| r.raw.as_str()).collect()
    }

    #[test]
    fn moves_are_bounded() {
        let mut references = parse_references(ITEM);
        assert!(!move_up(&mut references, 0));
        assert!(!move_down(&mut references, 2));
        assert!(!move_down(&mut references, 9));
        assert!(move_up(&mut references, 2));
        assert_eq!(raws(&references), vec!["{83}", "{62}", "{82}"]);
        assert!(move_down(&mut references, 0));
        assert_eq!(raws(&references), vec!["{62}", "{83}", "{82}"]);
    }

    #[test]
    fn delete_then_rebuild() {
        let item = parse_decoded(ITEM);
        let mut references = item.references();
        assert_eq!(delete_reference(&mut references, 1).unwrap().raw, "{82}");
        assert!(delete_reference(&mut references, 5).is_none());

        let text = rebuild_decoded(&item.header, &references);
        assert_eq!(text, "270, 0, 1, 50| 2, 969|| {83} {62} |");
        assert_eq!(parse_references(&text), references);
    }

    #[test]
    fn rebuilding_an_empty_list_keeps_the_header() {
        assert_eq!(rebuild_decoded("  13, 0 ", &[]), "13, 0||  |");
    }

    #[test]
    fn skin_is_appended_after_the_last_bar() {
        let text = apply_skin(ITEM, "Cosmetics_Weapon_Shiny").unwrap();
        assert_eq!(
            text,
            r#"270, 0, 1, 50| 2, 969|| {83} {82} {62} | "c", "Cosmetics_Weapon_Shiny" |"#
        );
        let item = parse_decoded(&text);
        assert_eq!(
            item.tokens.last(),
            Some(&PartToken::Cosmetic {
                value: PartId::Text("Cosmetics_Weapon_Shiny".to_string()),
                raw: r#""c", "Cosmetics_Weapon_Shiny""#.to_string(),
            })
        );
    }

    #[test]
    fn skin_names_are_escaped() {
        let text = apply_skin("13|| {2}", r#"A "B""#).unwrap();
        assert_eq!(text, r#"13|| {2} | "c", "A \"B\"" |"#);
        assert!(apply_skin("   ", "x").is_none());
    }
}
