//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "switch-shelf")]
#[command(about = "Catalog a local library of Switch game packages", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Location of the metadata cache database.
#[derive(Args, Clone)]
pub(crate) struct DbArgs {
    /// Cache database (defaults to the settings file, then the data directory)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan library folders and report titles, updates, DLC and skipped files
    Scan {
        /// Folders to scan (defaults to the settings file, then the current directory)
        folders: Vec<PathBuf>,

        /// Descend into subfolders
        #[arg(short, long)]
        recursive: bool,

        /// Print the whole library as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Do not read or write the metadata cache
        #[arg(long)]
        no_cache: bool,

        /// prod.keys file (defaults to the settings file, then ~/.switch/prod.keys)
        #[arg(long)]
        keys: Option<PathBuf>,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Manage the metadata cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Drop every cached entry
    Clear {
        #[command(flatten)]
        db: DbArgs,
    },

    /// Show cache location, version and size
    Info {
        #[command(flatten)]
        db: DbArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where each value comes from
    Show,

    /// Print the settings file path
    Path,
}
