//! switch-shelf CLI
//!
//! Command-line interface for cataloging a local library of Switch game
//! packages.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
use commands::cache::{run_cache_clear, run_cache_info};
use commands::config::{run_config_path, run_config_show};
use commands::scan::{ScanOptions, run_scan};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Scan {
            folders,
            recursive,
            json,
            no_cache,
            keys,
            db,
        } => run_scan(ScanOptions {
            folders,
            recursive,
            json,
            no_cache,
            keys,
            db: db.db,
            quiet: cli.quiet,
        }),
        Commands::Cache { action } => match action {
            CacheAction::Clear { db } => run_cache_clear(db.db),
            CacheAction::Info { db } => run_cache_info(db.db),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
    }
}
