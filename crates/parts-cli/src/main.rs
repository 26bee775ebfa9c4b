//! Parts Vault CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use parts_cli::commands::{
    TokenEdits, UpdateOverrides, Workspace, load_resolver, run_build, run_edit, run_inspect,
    run_resolve, run_update,
};
use parts_cli::logging::{LogConfig, LogFormat, init_logging};
use parts_cli::settings::{load_settings, locate_settings};
use parts_resolve::render_lines;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ResolveFormatArg};
use crate::summary::{print_aggregate, print_report, print_sections, print_snapshot};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings_path = locate_settings(cli.config.as_deref(), &cli.root);
    let workspace = Workspace::new(cli.root.clone(), load_settings(settings_path.as_deref()));

    let outcome = match cli.command {
        Command::Build(args) => {
            run_build(&workspace, args.output.as_deref()).map(|report| print_report(&report))
        }
        Command::Update(args) => {
            let overrides = UpdateOverrides {
                output: args.output,
                sources: args.sources,
                no_export: args.no_export,
            };
            run_update(&workspace, &overrides).and_then(|report| {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_report(&report);
                }
                Ok(())
            })
        }
        Command::Resolve(args) => {
            let resolver = load_resolver(&workspace, args.snapshot.as_deref());
            let rows = run_resolve(&resolver, &args.decoded, args.section.as_deref());
            match args.format {
                ResolveFormatArg::Table => {
                    print_aggregate(&rows);
                    Ok(())
                }
                ResolveFormatArg::Lines => {
                    for line in render_lines(&rows) {
                        println!("{line}");
                    }
                    Ok(())
                }
                ResolveFormatArg::Json => serde_json::to_string_pretty(&rows)
                    .map(|json| println!("{json}"))
                    .map_err(anyhow::Error::from),
            }
        }
        Command::Edit(args) => {
            let edits = TokenEdits {
                delete: args.delete,
                move_up: args.move_up,
                move_down: args.move_down,
                skin: args.skin,
            };
            run_edit(&args.decoded, &edits).map(|text| println!("{text}"))
        }
        Command::Inspect(args) => {
            run_inspect(&workspace, args.snapshot.as_deref()).map(|snapshot| print_snapshot(&snapshot))
        }
        Command::Sections => {
            print_sections(&workspace.settings.resolve.sections);
            Ok(())
        }
    };

    if let Err(error) = outcome {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
