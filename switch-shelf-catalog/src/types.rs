//! Data model of a scanned local library.
//!
//! A [`LocalLibrary`] groups files by title prefix into [`TitleRecord`]s and
//! keeps every file that did not make it into a record in the skip list,
//! together with the reason it was left out.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use switch_shelf_core::{ContentAttributes, DiscoveredFile, TitleId};

use crate::name_parser::display_title;

// ── Records ─────────────────────────────────────────────────────────────────

/// A file installed in one slot of a title record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub file: DiscoveredFile,
    pub attributes: ContentAttributes,
}

impl CatalogFile {
    pub fn new(file: DiscoveredFile, attributes: ContentAttributes) -> Self {
        Self { file, attributes }
    }

    /// Name for reports: the package's own title if a parser supplied one,
    /// otherwise whatever precedes the bracketed tags in the filename.
    pub fn display_name(&self) -> &str {
        match &self.attributes.name {
            Some(name) => name,
            None => display_title(&self.file.name),
        }
    }
}

/// Everything found locally for one title (all ids sharing a prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub base: Option<CatalogFile>,
    /// Every accepted update by version. Only [`latest_update`] contributes
    /// to the catalog; lower entries are kept to recognize duplicates.
    ///
    /// [`latest_update`]: TitleRecord::latest_update
    pub updates: BTreeMap<u64, CatalogFile>,
    /// Highest version seen per DLC id.
    pub dlc: BTreeMap<TitleId, CatalogFile>,
    /// The file that created this record held more than one content entry.
    pub multi_content: bool,
    /// The file that created this record was a split package.
    pub split: bool,
    pub latest_update: Option<u64>,
}

impl TitleRecord {
    pub fn new(multi_content: bool, split: bool) -> Self {
        Self {
            multi_content,
            split,
            ..Self::default()
        }
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    pub fn latest_update_file(&self) -> Option<&CatalogFile> {
        self.latest_update.and_then(|v| self.updates.get(&v))
    }

    /// Files that currently hold a slot: the base, the latest update and
    /// every DLC entry.
    pub fn contributing_files(&self) -> impl Iterator<Item = &CatalogFile> {
        self.base
            .iter()
            .chain(self.latest_update_file())
            .chain(self.dlc.values())
    }

    /// Best available name, preferring the base package.
    pub fn display_name(&self) -> Option<&str> {
        self.contributing_files().next().map(CatalogFile::display_name)
    }
}

// ── Skips ───────────────────────────────────────────────────────────────────

/// Why a file is not part of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a package type the library understands.
    UnsupportedType,
    /// The slot is already held by an equivalent file.
    Duplicate,
    /// A higher version of the same content exists.
    SupersededByNewer,
    /// No metadata could be determined.
    Unrecognized,
    /// The package could not be parsed.
    MalformedFile,
}

impl SkipReason {
    pub const ALL: [SkipReason; 5] = [
        Self::UnsupportedType,
        Self::Duplicate,
        Self::SupersededByNewer,
        Self::Unrecognized,
        Self::MalformedFile,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::UnsupportedType => "Unsupported type",
            Self::Duplicate => "Duplicate",
            Self::SupersededByNewer => "Superseded by newer",
            Self::Unrecognized => "Unrecognized",
            Self::MalformedFile => "Malformed file",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub file: DiscoveredFile,
    pub reason: SkipReason,
    pub detail: String,
}

// ── Library ─────────────────────────────────────────────────────────────────

/// The result of a scan: title records keyed by title prefix, plus the
/// skip list keyed by file path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalLibrary {
    pub titles: BTreeMap<String, TitleRecord>,
    pub skipped: BTreeMap<PathBuf, SkipRecord>,
    /// Number of files discovered, skipped ones included.
    pub num_files: usize,
}

impl LocalLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the skip list. A file is skipped at most once; if it is
    /// already listed the first reason is kept and `false` is returned.
    pub fn skip(&mut self, file: DiscoveredFile, reason: SkipReason, detail: impl Into<String>) -> bool {
        if let Some(existing) = self.skipped.get(&file.path) {
            log::debug!(
                "{} already skipped ({}), ignoring {}",
                file.name,
                existing.reason,
                reason
            );
            return false;
        }
        let detail = detail.into();
        log::debug!("Skipping {} ({}): {}", file.name, reason, detail);
        self.skipped.insert(
            file.path.clone(),
            SkipRecord {
                file,
                reason,
                detail,
            },
        );
        true
    }

    /// Take a file off the skip list. Returns whether it was listed.
    pub fn unskip(&mut self, path: &Path) -> bool {
        self.skipped.remove(path).is_some()
    }

    /// Whether the file holds a slot in any title record.
    pub fn holds_slot(&self, path: &Path) -> bool {
        self.contributing_files().any(|f| f.file.path == path)
    }

    pub fn is_skipped(&self, path: &Path) -> bool {
        self.skipped.contains_key(path)
    }

    pub fn skip_reason(&self, path: &Path) -> Option<SkipReason> {
        self.skipped.get(path).map(|record| record.reason)
    }

    pub fn skipped_with(&self, reason: SkipReason) -> impl Iterator<Item = &SkipRecord> {
        self.skipped.values().filter(move |record| record.reason == reason)
    }

    pub fn title(&self, prefix: &str) -> Option<&TitleRecord> {
        self.titles.get(prefix)
    }

    /// Every file holding a slot in some title record.
    pub fn contributing_files(&self) -> impl Iterator<Item = &CatalogFile> {
        self.titles.values().flat_map(|record| record.contributing_files())
    }
}
