//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "parts-vault",
    version,
    about = "Universal parts database: build, update and resolve part tokens",
    long_about = "Builds the universal parts database from local category tables, \
                  refreshes it from community spreadsheets, and resolves the part \
                  tokens of decoded item serials against it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: ./partsvault.toml, then the user config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Project root that relative paths are resolved against.
    #[arg(long = "root", value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rebuild the database from local sources.
    Build(BuildArgs),

    /// Refresh the database from remote spreadsheets.
    Update(UpdateArgs),

    /// Resolve the part tokens of a decoded item.
    Resolve(ResolveArgs),

    /// Reorder, delete or skin the tokens of a decoded item.
    Edit(EditArgs),

    /// Show what a snapshot contains.
    Inspect(InspectArgs),

    /// List editor sections and their source prefixes.
    Sections,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Snapshot to write (default from settings).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Snapshot to write (default from settings).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Extra source as NAME=URL; replaces the configured sources.
    #[arg(long = "source", value_name = "NAME=URL", value_parser = parse_source)]
    pub sources: Vec<(String, String)>,

    /// Do not rewrite the per-category tables.
    #[arg(long = "no-export")]
    pub no_export: bool,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Decoded item text (`header|| tokens |`).
    #[arg(value_name = "DECODED")]
    pub decoded: String,

    /// Editor section used to choose between rows sharing a code.
    #[arg(long = "section", value_name = "NAME")]
    pub section: Option<String>,

    /// Snapshot to read (default from settings).
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Output layout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ResolveFormatArg,
}

#[derive(Args)]
pub struct EditArgs {
    /// Decoded item text (`header|| tokens |`).
    #[arg(value_name = "DECODED")]
    pub decoded: String,

    /// Move the reference at this position one place earlier.
    #[arg(long = "move-up", value_name = "INDEX")]
    pub move_up: Option<usize>,

    /// Move the reference at this position one place later.
    #[arg(long = "move-down", value_name = "INDEX")]
    pub move_down: Option<usize>,

    /// Delete the reference at this position.
    #[arg(long = "delete", value_name = "INDEX")]
    pub delete: Option<usize>,

    /// Append a skin token after the edits.
    #[arg(long = "skin", value_name = "NAME")]
    pub skin: Option<String>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Snapshot to read (default from settings).
    #[arg(value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ResolveFormatArg {
    Table,
    Lines,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_source(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
            Ok((name.trim().to_string(), url.trim().to_string()))
        }
        _ => Err(format!("expected NAME=URL, got `{value}`")),
    }
}
