//! Console key sets (`prod.keys`).
//!
//! The file is a list of `name = hexvalue` lines. Blank lines and lines
//! starting with `#` or `;` are ignored. Only the presence of a usable
//! `header_key` matters here: it decides whether deep scanning is possible.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::KeysError;

/// Key that must be present for package headers to be readable.
pub const HEADER_KEY: &str = "header_key";

#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: BTreeMap<String, Vec<u8>>,
    path: Option<PathBuf>,
}

impl KeySet {
    /// `~/.switch/prod.keys`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".switch").join("prod.keys"))
    }

    pub fn load(path: &Path) -> Result<Self, KeysError> {
        let text = std::fs::read_to_string(path).map_err(|source| KeysError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut keys = Self::parse(&text, path)?;
        keys.path = Some(path.to_path_buf());
        log::debug!("Loaded {} keys from {}", keys.len(), path.display());
        Ok(keys)
    }

    /// Parse key file text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, KeysError> {
        let mut keys = BTreeMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let (name, value) = line.split_once('=').ok_or_else(|| KeysError::Syntax {
                path: origin.to_path_buf(),
                line: index + 1,
            })?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return Err(KeysError::Syntax {
                    path: origin.to_path_buf(),
                    line: index + 1,
                });
            }

            let bytes = hex::decode(value.trim()).map_err(|_| KeysError::InvalidHex {
                path: origin.to_path_buf(),
                line: index + 1,
                name: name.clone(),
            })?;
            keys.insert(name, bytes);
        }

        Ok(Self { keys, path: None })
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.keys.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// File the keys were loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn deep_scan_available(&self) -> bool {
        self.get(HEADER_KEY).is_some_and(|key| !key.is_empty())
    }
}

#[cfg(test)]
#[path = "tests/keys_tests.rs"]
mod tests;
