//! Canonical column set of the universal parts database.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One column of the canonical schema.
///
/// The declaration order is the on-disk column order of every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalColumn {
    /// Name of the source the row was loaded from.
    Source,
    /// Canonical identity, `{prefix:part}` or `{part}`.
    Code,
    Manufacturer,
    /// Weapon type or item category.
    ItemCategory,
    /// Part id within its type.
    Id,
    PartType,
    /// Display string shown to the user.
    DisplayString,
    ModelName,
    Stats,
    Effects,
    Requirements,
}

impl CanonicalColumn {
    /// All canonical columns in on-disk order.
    pub const ALL: [Self; 11] = [
        Self::Source,
        Self::Code,
        Self::Manufacturer,
        Self::ItemCategory,
        Self::Id,
        Self::PartType,
        Self::DisplayString,
        Self::ModelName,
        Self::Stats,
        Self::Effects,
        Self::Requirements,
    ];

    /// Header used for this column in snapshots and tables.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Code => "code",
            Self::Manufacturer => "Manufacturer",
            Self::ItemCategory => "Weapon Type",
            Self::Id => "ID",
            Self::PartType => "Part Type",
            Self::DisplayString => "String",
            Self::ModelName => "Model Name",
            Self::Stats => "Stats",
            Self::Effects => "Effects",
            Self::Requirements => "Requirements",
        }
    }

    /// Exact header match.
    #[must_use]
    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.header() == name)
    }

    /// Case-insensitive header match.
    #[must_use]
    pub fn from_header_ignore_case(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.header().eq_ignore_ascii_case(name))
    }

    /// Headers of all canonical columns in on-disk order.
    #[must_use]
    pub fn headers() -> Vec<String> {
        Self::ALL.iter().map(|c| c.header().to_string()).collect()
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
