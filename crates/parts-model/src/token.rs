//! Part tokens and the references they expand into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type id reserved for elemental parts.
pub const ELEMENTAL_TYPE_ID: u32 = 1;

/// Type id carried by cosmetic references, which have no item type.
pub const COSMETIC_TYPE_ID: u32 = 0;

/// Part id: numeric for regular parts, opaque text for some cosmetics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartId {
    Number(u32),
    Text(String),
}

impl PartId {
    /// Numeric value, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<u32> for PartId {
    fn from(value: u32) -> Self {
        Self::Number(value)
    }
}

/// One lexical unit of a decoded item's part stream.
///
/// Every variant keeps the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartToken {
    /// `{n}`: the type comes from the item header.
    Simple { id: u32, raw: String },
    /// `{type:part}`
    Typed {
        type_id: u32,
        part_id: u32,
        raw: String,
    },
    /// `{type:[a b c]}`
    Grouped {
        type_id: u32,
        part_ids: Vec<u32>,
        raw: String,
    },
    /// `"c", value`
    Cosmetic { value: PartId, raw: String },
}

impl PartToken {
    /// Original text of the token.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Simple { raw, .. }
            | Self::Typed { raw, .. }
            | Self::Grouped { raw, .. }
            | Self::Cosmetic { raw, .. } => raw,
        }
    }
}

/// Lookup path a reference is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    Part,
    Cosmetic,
    Elemental,
}

impl PartCategory {
    /// Category of a regular (non-cosmetic) part with the given type.
    #[must_use]
    pub const fn for_type(type_id: u32) -> Self {
        if type_id == ELEMENTAL_TYPE_ID {
            Self::Elemental
        } else {
            Self::Part
        }
    }
}

/// A typed reference to one part, ready for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartReference {
    pub type_id: u32,
    pub part_id: PartId,
    /// Token text this reference renders back to.
    pub raw: String,
    pub category: PartCategory,
}

impl PartReference {
    /// Reference written as an explicit `{type:part}` token.
    #[must_use]
    pub fn typed(type_id: u32, part_id: u32) -> Self {
        Self {
            type_id,
            part_id: PartId::Number(part_id),
            raw: format!("{{{type_id}:{part_id}}}"),
            category: PartCategory::for_type(type_id),
        }
    }

    /// Canonical database code: `{type:part}`, or the raw token for cosmetics.
    #[must_use]
    pub fn code(&self) -> String {
        match self.category {
            PartCategory::Cosmetic => self.raw.clone(),
            PartCategory::Part | PartCategory::Elemental => {
                format!("{{{}:{}}}", self.type_id, self.part_id)
            }
        }
    }
}
