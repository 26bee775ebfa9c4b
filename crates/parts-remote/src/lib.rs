//! Remote sources for the incremental updater.
//!
//! Community spreadsheets publish their tables under many endpoints and tab
//! ids, not all of which hold the full data. The [`Prober`] tries candidate
//! URLs through a pluggable [`Fetch`] capability, scores every usable CSV
//! response and keeps the best one. [`update`] fetches every configured
//! source, merges them and refreshes the snapshot on disk.

#![deny(unsafe_code)]

pub mod descriptor;
pub mod error;
pub mod fetch;
pub mod probe;
pub mod updater;

pub use descriptor::{
    PROBE_RANGE_END, SourceDescriptor, export_candidates, listing_pages, sheet_id, url_gid,
};
pub use error::{RemoteFetchError, Result};
pub use fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, Fetch, HttpFetcher};
pub use probe::{COMPLETE_TABLE_ROWS, ProbeConfig, ProbeOutcome, Prober, looks_like_html};
pub use updater::{DEFAULT_POLITENESS_DELAY, UpdateConfig, update};
