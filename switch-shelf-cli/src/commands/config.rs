use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use switch_shelf_lib::{KeySet, Settings, settings_path};

use crate::error::CliError;

/// Show effective settings.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = Settings::load()?;

    log::info!(
        "{}",
        "switch-shelf configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    log::info!("  Library folders:");
    for folder in settings.resolve_folders(Vec::new()) {
        log::info!("    {}", folder.display());
    }
    log::info!("  Recursive: {}", settings.resolve_recursive(false));

    match settings.resolve_keys_path(None) {
        Some(keys_path) => {
            let status = match KeySet::load(&keys_path) {
                Ok(keys) if keys.deep_scan_available() => "(deep scan available)"
                    .if_supports_color(Stdout, |t| t.green())
                    .to_string(),
                Ok(_) => "(no header_key)"
                    .if_supports_color(Stdout, |t| t.yellow())
                    .to_string(),
                Err(_) => "(not usable)"
                    .if_supports_color(Stdout, |t| t.dimmed())
                    .to_string(),
            };
            log::info!("  Keys file: {} {}", keys_path.display(), status);
        }
        None => log::info!("  Keys file: {}", "could not determine path".if_supports_color(Stdout, |t| t.red())),
    }

    log::info!(
        "  Cache database: {}",
        settings.resolve_database_path(None).display()
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
