//! Incremental update of the universal parts database from remote sources.

use std::path::PathBuf;
use std::time::Duration;

use parts_db::{
    MergeMode, RefreshError, diff_rows, export_categories, load_snapshot_or_empty, merge_sources,
    save_snapshot,
};
use parts_ingest::parse_csv_text;
use parts_map::normalize_table;
use parts_model::{RefreshReport, Snapshot, SourceFailure};
use tracing::{info, info_span, warn};

use crate::descriptor::SourceDescriptor;
use crate::fetch::Fetch;
use crate::probe::{ProbeConfig, Prober};

/// Pause between two sources.
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(600);

/// What an update fetches and where it writes.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    pub sources: Vec<SourceDescriptor>,
    pub output: PathBuf,
    /// Root under which category tables are re-exported; `None` skips export.
    pub export_root: Option<PathBuf>,
    pub politeness_delay: Duration,
    pub probe: ProbeConfig,
}

impl UpdateConfig {
    #[must_use]
    pub fn new(sources: Vec<SourceDescriptor>, output: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            output: output.into(),
            export_root: None,
            politeness_delay: DEFAULT_POLITENESS_DELAY,
            probe: ProbeConfig::default(),
        }
    }
}

/// Fetches every configured source and refreshes the snapshot.
///
/// Sources are fetched one at a time with a pause in between. A source that
/// cannot be fetched or parsed is listed in the report's failures; the run
/// fails only when no source could be fetched at all.
pub fn update<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &UpdateConfig,
) -> Result<RefreshReport, RefreshError> {
    let span = info_span!("update", sources = config.sources.len());
    let _guard = span.enter();

    let previous = load_snapshot_or_empty(&config.output);
    let mut prober = Prober::new(fetcher, config.probe);
    let mut tables = Vec::new();
    let mut failures = Vec::new();

    for (index, descriptor) in config.sources.iter().enumerate() {
        if index > 0 && !config.politeness_delay.is_zero() {
            std::thread::sleep(config.politeness_delay);
        }

        let fetched = prober.fetch_table(descriptor);
        let parsed = match fetched {
            Ok(outcome) => parse_csv_text(&outcome.text, &outcome.url).map_err(|e| e.to_string()),
            Err(err) => Err(err.to_string()),
        };
        match parsed {
            Ok(mut table) => {
                table.name.clone_from(&descriptor.name);
                info!(source = %descriptor.name, rows = table.records.len(), "fetched source");
                tables.push(table);
            }
            Err(reason) => {
                warn!(source = %descriptor.name, %reason, "skipping source");
                failures.push(SourceFailure {
                    name: descriptor.name.clone(),
                    origin: descriptor.url.clone(),
                    reason,
                });
            }
        }
    }

    if tables.is_empty() {
        return Err(RefreshError::NoSources { failures });
    }

    let normalized: Vec<_> = tables.iter().map(normalize_table).collect();
    let merged = merge_sources(&normalized, MergeMode::Updater);
    let key_fields = merged.key_fields();
    let diff = diff_rows(&previous.rows, &merged.rows, &key_fields);

    let exports = match &config.export_root {
        Some(root) => export_categories(root, &merged.available_columns(), &merged.rows)?,
        None => Default::default(),
    };

    let snapshot = Snapshot::new(merged.sources, merged.columns, key_fields, merged.rows);
    save_snapshot(&snapshot, &config.output)?;

    let report = RefreshReport {
        updated: !diff.is_unchanged() || previous.is_empty(),
        rows_before: previous.len(),
        rows_after: snapshot.len(),
        diff,
        failures,
        output: config.output.clone(),
        exports,
    };
    info!(
        updated = report.updated,
        rows = report.rows_after,
        failed = report.failures.len(),
        "update complete"
    );
    Ok(report)
}
