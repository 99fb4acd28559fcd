//! Guest outreach CLI.

use clap::{ColorChoice, Parser};
use outreach_cli::logging::{LogConfig, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{
    run_add, run_classify, run_delete, run_detect, run_edit, run_history, run_import, run_link,
    run_list, run_mark, run_ollama, run_review, run_settings, run_stats, run_sync,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let data_dir = cli.data_dir.as_deref();
    let result = match &cli.command {
        Command::Import { path } => run_import(data_dir, path),
        Command::Detect { path } => run_detect(path),
        Command::Sync { url } => run_sync(data_dir, url.as_deref()),
        Command::Stats => run_stats(data_dir),
        Command::List(args) => run_list(data_dir, args),
        Command::Review(args) => run_review(data_dir, args),
        Command::Add(args) => run_add(data_dir, args),
        Command::Edit { id, field, value } => run_edit(data_dir, *id, field, value),
        Command::Mark { id, action } => run_mark(data_dir, *id, *action),
        Command::Delete { id } => run_delete(data_dir, *id),
        Command::History { id } => run_history(data_dir, *id),
        Command::Settings(command) => run_settings(data_dir, command),
        Command::Ollama(command) => run_ollama(data_dir, command),
        Command::Classify { note, address } => {
            run_classify(note, address);
            Ok(())
        }
        Command::Link {
            profile,
            message,
            name,
        } => {
            run_link(profile.as_deref(), message.as_deref(), name.as_deref());
            Ok(())
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Explicit `--log-level` beats `-v`/`-q`, which beat `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !explicit,
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
    }
}
