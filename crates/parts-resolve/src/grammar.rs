//! Token grammar of a decoded item's part stream.
//!
//! ```text
//! COSMETIC := '"c"' ',' WS* (INTEGER | QUOTED_STRING)
//! GROUPED  := '{' INTEGER ':' '[' INTEGER (WS INTEGER)* ']' '}'
//! TYPED    := '{' INTEGER ':' INTEGER '}'
//! SIMPLE   := '{' INTEGER '}'
//! ```
//!
//! Only the text after the first `||` is scanned. Text between tokens is
//! skipped.

use std::sync::LazyLock;

use parts_model::{COSMETIC_TYPE_ID, PartCategory, PartId, PartReference, PartToken};
use regex::{Captures, Regex};

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{(\d+)(?::(\d+|\[\s*\d+(?:\s+\d+)*\s*\]))?\}|"c",\s*(?:(\d+)|"((?:[^"\\]|\\.)*)")"#)
        .expect("Invalid part token regex")
});

/// Separator between an item's header and its part stream.
pub const BODY_SEPARATOR: &str = "||";

/// A decoded item split into header and part tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedItem {
    /// Text before the first `||`, trimmed.
    pub header: String,
    /// Default type of `{n}` tokens.
    pub header_type: Option<u32>,
    pub tokens: Vec<PartToken>,
}

impl ParsedItem {
    /// Expands the tokens into references, in order.
    ///
    /// A simple token takes the header's type, or its own value when the
    /// header has none. A grouped token yields one typed reference per id.
    #[must_use]
    pub fn references(&self) -> Vec<PartReference> {
        let mut references = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            match token {
                PartToken::Simple { id, raw } => {
                    let type_id = self.header_type.unwrap_or(*id);
                    references.push(PartReference {
                        type_id,
                        part_id: PartId::Number(*id),
                        raw: raw.clone(),
                        category: PartCategory::for_type(type_id),
                    });
                }
                PartToken::Typed {
                    type_id,
                    part_id,
                    raw,
                } => references.push(PartReference {
                    type_id: *type_id,
                    part_id: PartId::Number(*part_id),
                    raw: raw.clone(),
                    category: PartCategory::for_type(*type_id),
                }),
                PartToken::Grouped {
                    type_id, part_ids, ..
                } => references.extend(
                    part_ids
                        .iter()
                        .map(|part_id| PartReference::typed(*type_id, *part_id)),
                ),
                PartToken::Cosmetic { value, raw } => references.push(PartReference {
                    type_id: COSMETIC_TYPE_ID,
                    part_id: value.clone(),
                    raw: raw.clone(),
                    category: PartCategory::Cosmetic,
                }),
            }
        }
        references
    }
}

/// Default type id from a header: first comma field of the first `|`
/// segment, when it is an integer.
#[must_use]
pub fn header_type_id(header: &str) -> Option<u32> {
    header
        .trim()
        .split('|')
        .next()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn token_from(caps: &Captures<'_>) -> Option<PartToken> {
    let raw = caps.get(0)?.as_str().to_string();

    if let Some(number) = caps.get(3) {
        let value = number
            .as_str()
            .parse()
            .map_or_else(|_| PartId::Text(number.as_str().to_string()), PartId::Number);
        return Some(PartToken::Cosmetic { value, raw });
    }
    if let Some(quoted) = caps.get(4) {
        return Some(PartToken::Cosmetic {
            value: PartId::Text(unescape(quoted.as_str())),
            raw,
        });
    }

    let outer: u32 = caps.get(1)?.as_str().parse().ok()?;
    let token = match caps.get(2).map(|m| m.as_str()) {
        None => PartToken::Simple { id: outer, raw },
        Some(inner) if inner.starts_with('[') => {
            let part_ids: Vec<u32> = inner
                .trim_matches(|c| c == '[' || c == ']')
                .split_whitespace()
                .filter_map(|id| id.parse().ok())
                .collect();
            if part_ids.is_empty() {
                return None;
            }
            PartToken::Grouped {
                type_id: outer,
                part_ids,
                raw,
            }
        }
        Some(inner) => PartToken::Typed {
            type_id: outer,
            part_id: inner.parse().ok()?,
            raw,
        },
    };
    Some(token)
}

/// All tokens of a part stream, in source order.
///
/// Numbers too large for a part id drop the token rather than failing.
#[must_use]
pub fn parse_tokens(body: &str) -> Vec<PartToken> {
    TOKEN_REGEX
        .captures_iter(body)
        .filter_map(|caps| token_from(&caps))
        .collect()
}

/// Parses a decoded item. Text without `||` has no tokens.
#[must_use]
pub fn parse_decoded(text: &str) -> ParsedItem {
    let Some((header, body)) = text.split_once(BODY_SEPARATOR) else {
        return ParsedItem::default();
    };
    ParsedItem {
        header: header.trim().to_string(),
        header_type: header_type_id(header),
        tokens: parse_tokens(body),
    }
}

/// Shorthand for `parse_decoded(text).references()`.
#[must_use]
pub fn parse_references(text: &str) -> Vec<PartReference> {
    parse_decoded(text).references()
}
