//! Application settings (`~/.config/switch-shelf/settings.toml`).
//!
//! Every value can be overridden from the command line. Resolution follows
//! the same chain everywhere: explicit override, then the settings file,
//! then a built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::keys::KeySet;

/// Canonical path to the settings file: `~/.config/switch-shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("switch-shelf").join("settings.toml")
}

/// Default cache database: `<data dir>/switch-shelf/slm.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("switch-shelf").join("slm.db")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub keys: KeysSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folders scanned when none are given on the command line.
    pub folders: Vec<PathBuf>,
    pub recursive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load the settings file, falling back to defaults when it does not
    /// exist.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents, path)
    }

    /// Parse settings text. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, SettingsError> {
        toml::from_str(contents).map_err(|source| SettingsError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Folders to scan:
    ///
    /// 1. CLI folders (if any)
    /// 2. `library.folders` in `settings.toml`
    /// 3. Current working directory
    pub fn resolve_folders(&self, cli_folders: Vec<PathBuf>) -> Vec<PathBuf> {
        if !cli_folders.is_empty() {
            return cli_folders;
        }
        if !self.library.folders.is_empty() {
            return self.library.folders.clone();
        }
        vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
    }

    /// The CLI flag can only turn recursion on.
    pub fn resolve_recursive(&self, cli_recursive: bool) -> bool {
        cli_recursive || self.library.recursive
    }

    pub fn resolve_keys_path(&self, cli_override: Option<PathBuf>) -> Option<PathBuf> {
        cli_override
            .or_else(|| self.keys.path.clone())
            .or_else(KeySet::default_path)
    }

    pub fn resolve_database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.cache.path.clone())
            .unwrap_or_else(default_database_path)
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
