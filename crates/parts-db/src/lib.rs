//! The universal parts database.
//!
//! Normalized source tables are merged into one deduplicated table
//! ([`merge`]), persisted as an immutable [`parts_model::Snapshot`]
//! ([`store`]), compared against the previous build ([`diff`]) and, for the
//! incremental updater, re-exported as per-category tables ([`export`]).
//! [`builder`] ties the offline full build together.

#![deny(unsafe_code)]

pub mod builder;
pub mod diff;
pub mod error;
pub mod export;
pub mod merge;
pub mod store;

pub use builder::{BuildConfig, DEFAULT_REFERENCE_TABLES, build, collect_build_inputs};
pub use diff::{diff_rows, row_hash};
pub use error::{RefreshError, SnapshotError};
pub use export::{CATEGORY_SCHEMAS, CategorySchema, export_categories};
pub use merge::{KeyPolicy, MergeMode, MergedTable, merge_sources};
pub use store::{SnapshotHandle, load_snapshot, load_snapshot_or_empty, parse_snapshot, save_snapshot};
