use thiserror::Error;

use switch_shelf_db::StoreError;
use switch_shelf_lib::{KeysError, ScanError, SettingsError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be loaded
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// Explicitly requested key file could not be loaded
    #[error("Keys error: {0}")]
    Keys(#[from] KeysError),

    /// Metadata cache could not be opened
    #[error("{0}")]
    Scan(#[from] ScanError),

    /// Metadata cache operation failed
    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
