use std::path::PathBuf;

use switch_shelf_catalog::FilenameError;
use switch_shelf_core::{ContainerError, ContainerKind};
use switch_shelf_db::StoreError;
use thiserror::Error;

/// Why no metadata could be determined for a file.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The filename fallback found no usable tags.
    #[error("unable to determine title id / version: {0}")]
    Unresolved(#[from] FilenameError),

    /// A structural parser was run on the package and failed.
    #[error("failed to read {kind} metadata: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: ContainerError,
    },
}

impl ResolveError {
    pub fn malformed(kind: ContainerKind, source: ContainerError) -> Self {
        Self::Malformed {
            kind: kind.display_name(),
            source,
        }
    }
}

/// Errors loading `settings.toml`.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors loading a `prod.keys` file.
#[derive(Debug, Error)]
pub enum KeysError {
    #[error("Failed to read keys file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: expected `name = hex`")]
    Syntax { path: PathBuf, line: usize },

    #[error("{path}:{line}: invalid hex value for {name}")]
    InvalidHex {
        path: PathBuf,
        line: usize,
        name: String,
    },
}

/// Fatal errors of a library scan. Per-file problems never end up here;
/// they are recorded in the skip list instead.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to open metadata cache: {0}")]
    Store(#[from] StoreError),
}
