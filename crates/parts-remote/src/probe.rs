//! Best-table discovery across candidate endpoints.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use parts_ingest::table_shape;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::descriptor::{SourceDescriptor, export_candidates, listing_pages};
use crate::error::{RemoteFetchError, Result};
use crate::fetch::Fetch;

/// Data rows at which a table counts as complete and probing stops.
pub const COMPLETE_TABLE_ROWS: usize = 5000;

static GID_REGEXES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"gid=(\d+)").expect("Invalid gid regex"),
        Regex::new(r#""gid":(\d+)"#).expect("Invalid gid regex"),
    ]
});

/// Probing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Stop probing once a candidate has this many data rows.
    pub complete_rows: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            complete_rows: COMPLETE_TABLE_ROWS,
        }
    }
}

/// The table chosen for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub url: String,
    pub text: String,
    /// `(data rows, columns)` of the chosen table.
    pub score: (usize, usize),
}

/// True for HTML pages served where CSV was expected.
#[must_use]
pub fn looks_like_html(text: &str) -> bool {
    let lowered = text.trim_start().to_lowercase();
    let head: String = lowered.chars().take(500).collect();
    lowered.starts_with("<!doctype html")
        || lowered.starts_with("<html")
        || lowered.contains("servicelogin")
        || head.contains("<head")
}

/// Scores a response body, rejecting anything that is not a usable table.
fn score_table(url: &str, text: &str) -> Result<(usize, usize)> {
    if looks_like_html(text) {
        return Err(RemoteFetchError::Html {
            url: url.to_string(),
        });
    }
    let not_a_table = |reason: &str| RemoteFetchError::NotATable {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let shape = table_shape(text).ok_or_else(|| not_a_table("no header row"))?;
    if shape.columns < 2 {
        return Err(not_a_table("fewer than two columns"));
    }
    if shape.named_columns() < 2 {
        return Err(not_a_table("fewer than two named columns"));
    }
    Ok((shape.data_rows, shape.columns))
}

/// Finds the best table for each source.
///
/// Tab ids discovered from a spreadsheet's listing pages are cached per
/// spreadsheet for the life of the prober.
pub struct Prober<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    config: ProbeConfig,
    gid_cache: HashMap<String, Vec<u32>>,
}

impl<'a, F: Fetch + ?Sized> Prober<'a, F> {
    pub fn new(fetcher: &'a F, config: ProbeConfig) -> Self {
        Self {
            fetcher,
            config,
            gid_cache: HashMap::new(),
        }
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.fetcher.fetch(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Tries candidates in order and keeps the highest score.
    ///
    /// Ties keep the earlier candidate. Stops as soon as a candidate reaches
    /// the completeness threshold.
    fn best_of(&self, candidates: &[String]) -> Option<ProbeOutcome> {
        let mut best: Option<ProbeOutcome> = None;
        for url in candidates {
            let scored = self
                .fetch_text(url)
                .and_then(|text| score_table(url, &text).map(|score| (text, score)));
            let (text, score) = match scored {
                Ok(found) => found,
                Err(err) => {
                    debug!(url, error = %err, "candidate rejected");
                    continue;
                }
            };
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(ProbeOutcome {
                    url: url.clone(),
                    text,
                    score,
                });
            }
            if score.0 >= self.config.complete_rows {
                break;
            }
        }
        best
    }

    /// Tab ids listed on a spreadsheet's pages, `[0]` when none are found.
    pub fn discover_gids(&mut self, sheet: &str) -> Vec<u32> {
        if let Some(cached) = self.gid_cache.get(sheet) {
            return cached.clone();
        }

        let mut found = BTreeSet::new();
        for page in listing_pages(sheet) {
            let html = match self.fetch_text(&page) {
                Ok(html) => html,
                Err(err) => {
                    debug!(url = %page, error = %err, "listing page unavailable");
                    continue;
                }
            };
            for regex in GID_REGEXES.iter() {
                found.extend(
                    regex
                        .captures_iter(&html)
                        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok()),
                );
            }
        }

        let gids: Vec<u32> = if found.is_empty() {
            vec![0]
        } else {
            found.into_iter().collect()
        };
        self.gid_cache.insert(sheet.to_string(), gids.clone());
        gids
    }

    /// Fetches the best table for a source.
    ///
    /// A first pass probes the default candidates. Below the completeness
    /// threshold a second pass retries with discovered tab ids first, and
    /// the better of the two wins; a sub-threshold best is still accepted.
    /// When no candidate yields a table the source URL itself is fetched.
    pub fn fetch_table(&mut self, descriptor: &SourceDescriptor) -> Result<ProbeOutcome> {
        let mut best = self.best_of(&export_candidates(descriptor, &[]));

        let complete = best
            .as_ref()
            .is_some_and(|b| b.score.0 >= self.config.complete_rows);
        if !complete && let Some(sheet) = descriptor.sheet_id() {
            let discovered = self.discover_gids(sheet);
            debug!(source = %descriptor.name, tabs = discovered.len(), "retrying with discovered tabs");
            if let Some(second) = self.best_of(&export_candidates(descriptor, &discovered))
                && best.as_ref().is_none_or(|b| second.score > b.score)
            {
                best = Some(second);
            }
        }

        if let Some(outcome) = best {
            if outcome.score.0 < self.config.complete_rows {
                warn!(
                    source = %descriptor.name,
                    rows = outcome.score.0,
                    "best table is below the completeness threshold"
                );
            }
            info!(source = %descriptor.name, url = %outcome.url, rows = outcome.score.0, columns = outcome.score.1, "selected table");
            return Ok(outcome);
        }

        warn!(source = %descriptor.name, "no candidate produced a table, fetching source URL");
        let text = self.fetch_text(&descriptor.url)?;
        if looks_like_html(&text) {
            return Err(RemoteFetchError::Html {
                url: descriptor.url.clone(),
            });
        }
        let score = table_shape(&text).map_or((0, 0), |s| (s.data_rows, s.columns));
        Ok(ProbeOutcome {
            url: descriptor.url.clone(),
            text,
            score,
        })
    }
}
