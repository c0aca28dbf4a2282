//! Files discovered on disk and the triage of their names.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// A file found while walking the library folders.
///
/// Produced once by discovery and never modified afterwards. Its cache
/// identity is the (path, name, size) triple, not a content hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscoveredFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Directory the file sits in.
    pub base_dir: PathBuf,
    /// File name including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, when the filesystem reports one.
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
}

impl DiscoveredFile {
    /// Build a record for a regular file without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            base_dir,
            name,
            size,
            modified: None,
            is_dir: false,
        }
    }

    /// Build a record from the file's metadata on disk.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let mut file = Self::new(path, meta.len());
        file.modified = meta.modified().ok();
        file.is_dir = meta.is_dir();
        Ok(file)
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Cache key for this file: `path|name|size`.
    pub fn fingerprint(&self) -> String {
        format!("{}|{}|{}", self.path.display(), self.name, self.size)
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_file_name(&self.name)
    }
}

/// Package container formats that have a structural parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContainerKind {
    /// NSP or compressed NSZ.
    Nsp,
    /// XCI cartridge image or compressed XCZ.
    Xci,
    /// First segment (`*00`) of a package split into numbered parts.
    Split,
}

impl ContainerKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nsp => "NSP",
            Self::Xci => "XCI",
            Self::Split => "split package",
        }
    }
}

/// What a file looks like from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A package whose metadata can be read.
    Container(ContainerKind),
    /// A non-first segment of a split package; its metadata comes from
    /// segment `00`.
    SplitSegment(u8),
    Unsupported,
}

impl FileKind {
    /// Classify a file by name (case-insensitive).
    ///
    /// A name ending in two digits is a split segment: `00` is the first
    /// segment, anything else a continuation.
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();

        if let Some(part) = split_part(&lower) {
            return if part == 0 {
                Self::Container(ContainerKind::Split)
            } else {
                Self::SplitSegment(part)
            };
        }

        match lower.rsplit_once('.').map(|(_, ext)| ext) {
            Some("nsp" | "nsz") => Self::Container(ContainerKind::Nsp),
            Some("xci" | "xcz") => Self::Container(ContainerKind::Xci),
            _ => Self::Unsupported,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Self::Container(ContainerKind::Split))
    }
}

/// Numeric value of a two-digit name suffix, if there is one.
fn split_part(name: &str) -> Option<u8> {
    let bytes = name.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let tail = &bytes[bytes.len() - 2..];
    if tail.iter().all(u8::is_ascii_digit) {
        Some((tail[0] - b'0') * 10 + (tail[1] - b'0'))
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/file_tests.rs"]
mod tests;
