use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use switch_shelf_core::util::format_bytes;
use switch_shelf_db::{MetadataCache, SqliteStore};
use switch_shelf_lib::{APP_VERSION, Settings, clear_cache};

use crate::error::CliError;

/// Drop every cached metadata entry, stale ones included.
pub(crate) fn run_cache_clear(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = Settings::load()?.resolve_database_path(db);
    let entries = clear_cache(&path)?;

    log::info!(
        "{} Cache cleared ({} entries removed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        entries,
    );
    Ok(())
}

/// Show where the cache lives and what it holds, without modifying it.
pub(crate) fn run_cache_info(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = Settings::load()?.resolve_database_path(db);

    log::info!(
        "{}",
        "Metadata cache".if_supports_color(Stdout, |t| t.bold()),
    );
    if !path.exists() {
        log::info!(
            "  Database: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    let size = std::fs::metadata(&path)?.len();
    let cache = MetadataCache::attach(SqliteStore::open_read_only(&path)?, APP_VERSION);
    let stored = cache.stored_version()?;

    log::info!(
        "  Database: {} ({})",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        format_bytes(size),
    );
    log::info!("  Entries:  {}", cache.entry_count()?);
    if cache.is_current()? {
        log::info!("  Version:  {}", stored.as_deref().unwrap_or(APP_VERSION));
    } else {
        log::info!(
            "  Version:  {} {}",
            stored.as_deref().unwrap_or("<none>"),
            format!("(stale, cleared on next scan by {})", APP_VERSION)
                .if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}
