//! `partsvault.toml` settings.
//!
//! The file is looked up in this order: the `--config` path, the project
//! root, then the platform config folder:
//! - macOS: ~/Library/Application Support/com.parts-vault.Parts-Vault/
//! - Windows: %APPDATA%/parts-vault/Parts Vault/config/
//! - Linux: ~/.config/partsvault/
//!
//! A missing or unreadable file means defaults. Relative paths in the file
//! are resolved against the project root.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use parts_db::BuildConfig;
use parts_remote::{
    COMPLETE_TABLE_ROWS, DEFAULT_POLITENESS_DELAY, DEFAULT_TIMEOUT, ProbeConfig, SourceDescriptor,
    UpdateConfig,
};
use parts_resolve::SectionPrefixes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "parts-vault";
const APP_NAME: &str = "Parts Vault";

/// Settings file name.
pub const CONFIG_FILENAME: &str = "partsvault.toml";

/// Community spreadsheets read by `update` when none are configured.
pub const DEFAULT_SOURCES: &[(&str, &str)] = &[
    (
        "deserilization",
        "https://docs.google.com/spreadsheets/d/17LHzPR7BltqgzbJZplr-APhORgT2PTIsV08n4RD3tMw/export?format=csv&gid=1385091622",
    ),
    (
        "parts_master",
        "https://docs.google.com/spreadsheets/d/11TmXyGmIVoDFn4IFNJN1s2HuijSnn_nPZqN3LkDd5TA/export?format=csv&gid=1385091622",
    ),
];

/// All settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub build: BuildSettings,
    pub update: UpdateSettings,
    pub resolve: ResolveSettings,
}

/// `[build]`: local source locations for a full build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub sources_dir: PathBuf,
    pub table_dir: PathBuf,
    pub reference_tables: Vec<PathBuf>,
    pub output: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        let defaults = BuildConfig::for_root("");
        Self {
            sources_dir: defaults.sources_dir,
            table_dir: defaults.table_dir,
            reference_tables: defaults.reference_tables,
            output: defaults.output,
        }
    }
}

impl BuildSettings {
    #[must_use]
    pub fn to_config(&self, root: &Path) -> BuildConfig {
        BuildConfig {
            root: root.to_path_buf(),
            sources_dir: self.sources_dir.clone(),
            table_dir: self.table_dir.clone(),
            reference_tables: self.reference_tables.clone(),
            output: self.output.clone(),
        }
    }
}

/// `[update]`: remote sources and probing knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    pub sources: Vec<SourceDescriptor>,
    pub output: PathBuf,
    /// Re-export category tables under the project root.
    pub export: bool,
    pub timeout_secs: u64,
    pub politeness_delay_ms: u64,
    pub complete_rows: usize,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES
                .iter()
                .map(|(name, url)| SourceDescriptor::new(*name, *url))
                .collect(),
            output: PathBuf::from("db/community_parts_db.json"),
            export: true,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            politeness_delay_ms: u64::try_from(DEFAULT_POLITENESS_DELAY.as_millis())
                .unwrap_or(600),
            complete_rows: COMPLETE_TABLE_ROWS,
        }
    }
}

impl UpdateSettings {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn to_config(&self, root: &Path) -> UpdateConfig {
        let mut config = UpdateConfig::new(self.sources.clone(), root.join(&self.output));
        config.export_root = self.export.then(|| root.to_path_buf());
        config.politeness_delay = Duration::from_millis(self.politeness_delay_ms);
        config.probe = ProbeConfig {
            complete_rows: self.complete_rows,
        };
        config
    }
}

/// `[resolve]`: snapshot and side tables used to resolve items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveSettings {
    pub snapshot: PathBuf,
    pub elemental: PathBuf,
    pub skin_names: PathBuf,
    pub sections: SectionPrefixes,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("db/universal_parts_db.json"),
            elemental: PathBuf::from("weapon_edit/elemental.csv"),
            skin_names: PathBuf::from("db/weapon_skin_names.json"),
            sections: SectionPrefixes::default(),
        }
    }
}

impl Settings {
    /// Parses a settings document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Settings file in the platform config folder.
#[must_use]
pub fn user_settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// The settings file to read, if any.
///
/// An explicit path is always returned, existing or not, so that a typo is
/// reported rather than silently ignored.
#[must_use]
pub fn locate_settings(explicit: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = root.join(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }
    user_settings_path().filter(|path| path.is_file())
}

/// Reads settings, falling back to defaults on any problem.
#[must_use]
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        info!("no settings file found, using defaults");
        return Settings::default();
    };

    match fs::read_to_string(path) {
        Ok(content) => match Settings::from_toml_str(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings file, using defaults");
                Settings::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read settings file, using defaults");
            Settings::default()
        }
    }
}
