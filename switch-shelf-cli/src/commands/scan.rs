use std::collections::BTreeSet;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use switch_shelf_catalog::{LocalLibrary, SkipReason};
use switch_shelf_core::util::format_bytes;
use switch_shelf_core::{ProgressSink, ScanProgress};
use switch_shelf_lib::{
    ContainerParsers, KeySet, LibraryScanner, MetadataResolver, Settings, open_cache,
};

use crate::error::CliError;

/// Options for `scan`, after clap parsing.
pub(crate) struct ScanOptions {
    pub folders: Vec<PathBuf>,
    pub recursive: bool,
    pub json: bool,
    pub no_cache: bool,
    pub keys: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the scan command.
pub(crate) fn run_scan(options: ScanOptions) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let folders = settings.resolve_folders(options.folders);
    let recursive = settings.resolve_recursive(options.recursive);
    let deep_scan = deep_scan_available(&settings, options.keys)?;

    // Opening the cache is the one step that must not fail.
    let cache = if options.no_cache {
        None
    } else {
        let path = settings.resolve_database_path(options.db);
        log::debug!("Metadata cache: {}", path.display());
        Some(open_cache(&path)?)
    };

    let parsers = ContainerParsers::new();
    if deep_scan && parsers.is_empty() {
        log::debug!("No container parsers available; using cached metadata and file names");
    }

    let resolver = MetadataResolver::new(cache, parsers, deep_scan);
    let mut scanner = LibraryScanner::new(resolver).with_recursive(recursive);

    for folder in &folders {
        log::debug!("Library folder: {}", folder.display());
    }

    let bar = ScanBar::new(options.quiet || options.json);
    let library = scanner.scan(&folders, Some(&bar));
    bar.finish();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&library)?);
    } else {
        print_summary(&library);
    }
    Ok(())
}

/// Whether a key set with a header key can be loaded.
///
/// A missing default key file just disables deep scanning; a key file the
/// user pointed at explicitly must load.
fn deep_scan_available(settings: &Settings, cli_keys: Option<PathBuf>) -> Result<bool, CliError> {
    let explicit = cli_keys.is_some() || settings.keys.path.is_some();
    let Some(path) = settings.resolve_keys_path(cli_keys) else {
        log::debug!("No home directory, skipping key lookup");
        return Ok(false);
    };

    match KeySet::load(&path) {
        Ok(keys) if keys.deep_scan_available() => {
            log::debug!("Deep scan enabled with keys from {}", path.display());
            Ok(true)
        }
        Ok(_) => {
            log::warn!(
                "{} has no header_key; reading metadata from file names only",
                path.display()
            );
            Ok(false)
        }
        Err(e) if explicit => Err(e.into()),
        Err(e) => {
            log::debug!("{}", e);
            log::info!(
                "{}",
                "No prod.keys found; reading metadata from file names only"
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
            Ok(false)
        }
    }
}

/// Progress bar fed by scan milestones.
struct ScanBar {
    bar: ProgressBar,
}

impl ScanBar {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for ScanBar {
    fn update(&self, progress: ScanProgress) {
        match (progress.current, progress.total) {
            (Some(current), Some(total)) => {
                self.bar.set_length(total as u64);
                self.bar.set_position(current as u64);
            }
            _ => self.bar.tick(),
        }
        let message = progress
            .message
            .strip_prefix("process:")
            .unwrap_or(&progress.message)
            .to_string();
        self.bar.set_message(message);
    }
}

fn print_summary(library: &LocalLibrary) {
    let cataloged: BTreeSet<_> = library
        .contributing_files()
        .map(|f| (&f.file.path, f.file.size))
        .collect();
    let total_size: u64 = cataloged.iter().map(|(_, size)| size).sum();

    log::info!(
        "{}",
        "Local library".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  {} titles, {} of {} files cataloged ({})",
        library.titles.len(),
        cataloged.len(),
        library.num_files,
        format_bytes(total_size),
    );
    log::info!("");

    for (prefix, record) in &library.titles {
        let base = if record.has_base() {
            "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "\u{2718}".if_supports_color(Stdout, |t| t.red()).to_string()
        };
        let update = record
            .latest_update
            .map(|v| format!("v{}", v))
            .unwrap_or_else(|| "-".to_string());

        log::info!(
            "  {} {} [{}]",
            base,
            record
                .display_name()
                .unwrap_or("?")
                .if_supports_color(Stdout, |t| t.bold()),
            prefix.if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!(
            "      update: {}  DLC: {}{}",
            update.if_supports_color(Stdout, |t| t.cyan()),
            record.dlc.len(),
            if record.split { "  (split)" } else { "" },
        );
    }

    if library.skipped.is_empty() {
        return;
    }

    log::info!("");
    log::info!(
        "{} ({})",
        "Skipped files".if_supports_color(Stdout, |t| t.bold()),
        library.skipped.len(),
    );
    for reason in SkipReason::ALL {
        let skipped: Vec<_> = library.skipped_with(reason).collect();
        if skipped.is_empty() {
            continue;
        }
        log::info!(
            "  {} ({})",
            reason.if_supports_color(Stdout, |t| t.yellow()),
            skipped.len(),
        );
        for record in skipped {
            log::info!("    {}: {}", record.file.path.display(), record.detail);
        }
    }
}
