//! Remote source descriptors and candidate URL derivation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SHEET_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"docs\.google\.com/spreadsheets/d/([^/]+)/").expect("Invalid sheet id regex")
});

static URL_GID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&#]gid=(\d+)").expect("Invalid gid regex"));

const SHEET_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Highest tab id tried by the blind probe.
pub const PROBE_RANGE_END: u32 = 80;

/// A named remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    pub url: String,
    /// Tab ids known to hold data, tried before the blind probe.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gids: Vec<u32>,
}

impl SourceDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            gids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_gids(mut self, gids: impl IntoIterator<Item = u32>) -> Self {
        self.gids = gids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn sheet_id(&self) -> Option<&str> {
        sheet_id(&self.url)
    }
}

/// Spreadsheet id of a spreadsheet URL.
#[must_use]
pub fn sheet_id(url: &str) -> Option<&str> {
    SHEET_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Tab id carried in a URL's query or fragment.
#[must_use]
pub fn url_gid(url: &str) -> Option<u32> {
    URL_GID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Candidate CSV export URLs for a source, best guesses first.
///
/// For spreadsheet URLs the tab ids are, in order and without repeats: the
/// `preferred` ids, the descriptor's own ids, the id in the URL, `0`, then
/// `0..=80`. Each tab is tried through the export endpoint and the
/// visualization endpoint. Any other URL is its own only candidate.
#[must_use]
pub fn export_candidates(descriptor: &SourceDescriptor, preferred: &[u32]) -> Vec<String> {
    let Some(sheet) = descriptor.sheet_id() else {
        return vec![descriptor.url.clone()];
    };

    let mut gids: Vec<u32> = Vec::new();
    let ordered = preferred
        .iter()
        .chain(&descriptor.gids)
        .copied()
        .chain(url_gid(&descriptor.url))
        .chain(std::iter::once(0))
        .chain(0..=PROBE_RANGE_END);
    for gid in ordered {
        if !gids.contains(&gid) {
            gids.push(gid);
        }
    }

    gids.into_iter()
        .flat_map(|gid| {
            [
                format!("{SHEET_BASE}/{sheet}/export?format=csv&gid={gid}"),
                format!("{SHEET_BASE}/{sheet}/gviz/tq?tqx=out:csv&gid={gid}"),
            ]
        })
        .collect()
}

/// Listing pages of a spreadsheet, scanned for tab ids.
#[must_use]
pub fn listing_pages(sheet: &str) -> [String; 2] {
    [
        format!("{SHEET_BASE}/{sheet}/edit"),
        format!("{SHEET_BASE}/{sheet}/htmlview"),
    ]
}
