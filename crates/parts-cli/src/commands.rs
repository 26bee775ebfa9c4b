//! Command implementations, independent of argument parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use parts_db::{SnapshotHandle, build, load_snapshot};
use parts_model::{RefreshReport, Snapshot};
use parts_remote::{HttpFetcher, SourceDescriptor, update};
use parts_resolve::{
    AggregateRow, ElementalTable, PartsIndex, Resolver, SkinNames, apply_skin, delete_reference,
    move_down, move_up, parse_decoded, rebuild_decoded,
};
use tracing::{info, info_span, warn};

use crate::settings::Settings;

/// Settings plus the root their relative paths hang off.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Workspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    #[must_use]
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

pub fn run_build(workspace: &Workspace, output: Option<&Path>) -> Result<RefreshReport> {
    let mut config = workspace.settings.build.to_config(&workspace.root);
    if let Some(output) = output {
        config.output = output.to_path_buf();
    }
    build(&config).with_context(|| format!("build {}", config.output_path().display()))
}

/// Options of an update run that override the settings.
#[derive(Debug, Clone, Default)]
pub struct UpdateOverrides {
    pub output: Option<PathBuf>,
    pub sources: Vec<(String, String)>,
    pub no_export: bool,
}

pub fn run_update(workspace: &Workspace, overrides: &UpdateOverrides) -> Result<RefreshReport> {
    let mut settings = workspace.settings.update.clone();
    if !overrides.sources.is_empty() {
        settings.sources = overrides
            .sources
            .iter()
            .map(|(name, url)| SourceDescriptor::new(name.as_str(), url.as_str()))
            .collect();
    }
    if overrides.no_export {
        settings.export = false;
    }
    if settings.sources.is_empty() {
        bail!("no remote sources configured");
    }

    let mut config = settings.to_config(&workspace.root);
    if let Some(output) = &overrides.output {
        config.output = workspace.path(output);
    }

    let fetcher = HttpFetcher::new(settings.timeout()).context("create HTTP client")?;
    update(&fetcher, &config).with_context(|| format!("update {}", config.output.display()))
}

/// Resolver over the configured snapshot and side tables.
///
/// Missing side tables only cost resolution quality and are logged.
#[must_use]
pub fn load_resolver(workspace: &Workspace, snapshot: Option<&Path>) -> Resolver {
    let settings = &workspace.settings.resolve;
    let snapshot_path = workspace.path(snapshot.unwrap_or(settings.snapshot.as_path()));
    let handle = SnapshotHandle::open(&snapshot_path);
    let current = handle.current();
    if current.is_empty() {
        warn!(path = %snapshot_path.display(), "parts database is empty, parts will resolve as Unknown");
    }

    let elemental_path = workspace.path(&settings.elemental);
    let elemental = ElementalTable::load(&elemental_path).unwrap_or_else(|err| {
        warn!(path = %elemental_path.display(), error = %err, "elemental table unavailable");
        ElementalTable::default()
    });
    let skins_path = workspace.path(&settings.skin_names);
    let skins = SkinNames::load(&skins_path).unwrap_or_else(|err| {
        warn!(path = %skins_path.display(), error = %err, "skin names unavailable");
        SkinNames::default()
    });

    info!(
        rows = current.len(),
        elements = elemental.len(),
        skins = skins.len(),
        "resolver ready"
    );
    Resolver::new(PartsIndex::new(current))
        .with_elemental(elemental)
        .with_skin_names(skins)
        .with_sections(settings.sections.clone())
}

pub fn run_resolve(
    resolver: &Resolver,
    decoded: &str,
    section: Option<&str>,
) -> Vec<AggregateRow> {
    let span = info_span!("resolve", section = section.unwrap_or("-"));
    let _guard = span.enter();

    if !decoded.contains("||") {
        warn!("decoded text has no `||` separator, nothing to resolve");
    }
    if let Some(section) = section
        && resolver.sections().prefixes(section).is_empty()
    {
        warn!(section, "section has no source prefixes, first match wins");
    }
    resolver.resolve_decoded(decoded, section)
}

/// Token edits applied in order: delete, move up, move down, then skin.
#[derive(Debug, Clone, Default)]
pub struct TokenEdits {
    pub delete: Option<usize>,
    pub move_up: Option<usize>,
    pub move_down: Option<usize>,
    pub skin: Option<String>,
}

pub fn run_edit(decoded: &str, edits: &TokenEdits) -> Result<String> {
    if !decoded.contains("||") {
        bail!("decoded text has no `||` separator");
    }
    let item = parse_decoded(decoded);
    let mut references = item.references();
    let count = references.len();
    let out_of_range = |index: usize| anyhow!("no token at position {index} ({count} tokens)");

    if let Some(index) = edits.delete {
        delete_reference(&mut references, index).ok_or_else(|| out_of_range(index))?;
    }
    if let Some(index) = edits.move_up
        && !move_up(&mut references, index)
    {
        bail!("cannot move token {index} up");
    }
    if let Some(index) = edits.move_down
        && !move_down(&mut references, index)
    {
        bail!("cannot move token {index} down");
    }

    let text = rebuild_decoded(&item.header, &references);
    match &edits.skin {
        Some(skin) => apply_skin(&text, skin).ok_or_else(|| anyhow!("empty item, cannot apply skin")),
        None => Ok(text),
    }
}

pub fn run_inspect(workspace: &Workspace, snapshot: Option<&Path>) -> Result<Snapshot> {
    let path = workspace.path(snapshot.unwrap_or(workspace.settings.resolve.snapshot.as_path()));
    load_snapshot(&path).with_context(|| format!("read {}", path.display()))
}
