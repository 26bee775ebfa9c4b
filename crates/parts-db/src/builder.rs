//! Offline full build of the universal parts database.

use std::path::{Path, PathBuf};

use parts_ingest::{SourceFormat, list_source_files, load_sources};
use parts_map::normalize_table;
use parts_model::{RefreshReport, Snapshot};
use tracing::{debug, info, info_span, warn};

use crate::diff::diff_rows;
use crate::error::RefreshError;
use crate::merge::{MergeMode, merge_sources};
use crate::store::{load_snapshot_or_empty, save_snapshot};

/// Per-category reference tables included in every full build.
pub const DEFAULT_REFERENCE_TABLES: &[&str] = &[
    "weapon_edit/all_weapon_part.csv",
    "weapon_edit/all_weapon_part_EN.csv",
    "grenade/grenade_main_perk.csv",
    "grenade/manufacturer_rarity_perk.csv",
    "shield/shield_main_perk.csv",
    "shield/manufacturer_perk.csv",
    "repkit/repkit_main_perk.csv",
    "repkit/repkit_manufacturer_perk.csv",
    "heavy/heavy_main_perk.csv",
    "heavy/heavy_manufacturer_perk.csv",
    "enhancement/Enhancement_perk.csv",
    "enhancement/Enhancement_manufacturers.csv",
];

/// Locations read and written by a full build.
///
/// Relative paths are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub root: PathBuf,
    /// Drop-in directory of JSON and CSV sources.
    pub sources_dir: PathBuf,
    /// Directory of flat CSV tables.
    pub table_dir: PathBuf,
    pub reference_tables: Vec<PathBuf>,
    pub output: PathBuf,
}

impl BuildConfig {
    /// Default layout under a project root.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sources_dir: PathBuf::from("db/sources"),
            table_dir: PathBuf::from("db"),
            reference_tables: DEFAULT_REFERENCE_TABLES.iter().map(PathBuf::from).collect(),
            output: PathBuf::from("db/universal_parts_db.json"),
        }
    }

    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn list_or_skip(dir: &Path, formats: &[SourceFormat]) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "source directory missing, skipped");
        return Vec::new();
    }
    list_source_files(dir, formats).unwrap_or_else(|err| {
        warn!(dir = %dir.display(), error = %err, "could not list source directory");
        Vec::new()
    })
}

/// Every `(source name, path)` a full build reads, in load order.
///
/// The drop-in sources directory comes first, then the flat tables, then the
/// reference tables. Missing locations are left out.
#[must_use]
pub fn collect_build_inputs(config: &BuildConfig) -> Vec<(String, PathBuf)> {
    let mut inputs = Vec::new();

    let sources_dir = config.resolve(&config.sources_dir);
    for path in list_or_skip(&sources_dir, &[SourceFormat::Csv, SourceFormat::Json]) {
        inputs.push((file_stem(&path), path));
    }

    let table_dir = config.resolve(&config.table_dir);
    for path in list_or_skip(&table_dir, &[SourceFormat::Csv]) {
        inputs.push((file_stem(&path), path));
    }

    for table in &config.reference_tables {
        let path = config.resolve(table);
        if path.is_file() {
            inputs.push((file_stem(&path), path));
        } else {
            debug!(path = %path.display(), "reference table missing, skipped");
        }
    }

    inputs
}

/// Rebuilds the universal parts database from local sources.
///
/// Always writes a fresh snapshot. The report compares it with the snapshot
/// previously at the output path.
pub fn build(config: &BuildConfig) -> Result<RefreshReport, RefreshError> {
    let span = info_span!("build", root = %config.root.display());
    let _guard = span.enter();

    let inputs = collect_build_inputs(config);
    info!(sources = inputs.len(), "collected build inputs");

    let outcome = load_sources(&inputs);
    if outcome.tables.is_empty() {
        return Err(RefreshError::NoSources {
            failures: outcome.failures,
        });
    }

    let normalized: Vec<_> = outcome.tables.iter().map(normalize_table).collect();
    let merged = merge_sources(&normalized, MergeMode::Builder);

    let output = config.output_path();
    let previous = load_snapshot_or_empty(&output);
    let key_fields = merged.key_fields();
    let diff = diff_rows(&previous.rows, &merged.rows, &key_fields);

    let snapshot = Snapshot::new(merged.sources, merged.columns, key_fields, merged.rows);
    save_snapshot(&snapshot, &output)?;

    let report = RefreshReport {
        updated: !diff.is_unchanged() || previous.is_empty(),
        rows_before: previous.len(),
        rows_after: snapshot.len(),
        diff,
        failures: outcome.failures,
        output,
        exports: Default::default(),
    };
    info!(
        rows = report.rows_after,
        added = diff.added,
        removed = diff.removed,
        changed = diff.changed,
        "build complete"
    );
    Ok(report)
}
