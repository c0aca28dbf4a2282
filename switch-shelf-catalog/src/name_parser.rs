//! Fallback metadata from package filenames.
//!
//! Release names usually embed the title id and version as bracketed tags:
//! ```text
//! Some Game [0100ABCDEF123000][v65536].nsp
//! ```
//!
//! This is only used when the package itself could not be read, so the
//! result is never cached.

use regex::Regex;
use switch_shelf_core::{ContentAttributes, ContentMap, TitleId, single_content};
use thiserror::Error;

/// Why a filename did not yield metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("no title id found in file name")]
    NoTitleIdFound,
    #[error("no version found in file name")]
    NoVersionFound,
}

/// Title id and version read from a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFileName {
    pub title_id: TitleId,
    pub version: u64,
}

/// Extracts title id and version from bracketed filename tags.
///
/// Holds its compiled patterns, so build one and reuse it for a whole scan.
#[derive(Debug, Clone)]
pub struct FilenameParser {
    version: Regex,
    title_id: Regex,
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameParser {
    pub fn new() -> Self {
        Self {
            version: Regex::new(r"\[[vV]?([0-9]{1,10})\]").expect("static pattern"),
            title_id: Regex::new(r"\[([A-Za-z0-9]{16})\]").expect("static pattern"),
        }
    }

    /// First `[v123]` or `[123]` tag (1 to 10 digits).
    pub fn parse_version(&self, file_name: &str) -> Result<u64, FilenameError> {
        self.version
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or(FilenameError::NoVersionFound)
    }

    /// First bracketed 16-character alphanumeric tag, lowercased.
    pub fn parse_title_id(&self, file_name: &str) -> Result<TitleId, FilenameError> {
        self.title_id
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| TitleId::parse(m.as_str()).ok())
            .ok_or(FilenameError::NoTitleIdFound)
    }

    /// Both tags are required.
    pub fn parse(&self, file_name: &str) -> Result<ParsedFileName, FilenameError> {
        let title_id = self.parse_title_id(file_name)?;
        let version = self.parse_version(file_name)?;
        Ok(ParsedFileName { title_id, version })
    }

    /// Parse a filename into a one-entry content map.
    ///
    /// The content type comes from the title id suffix, exactly as for
    /// metadata read from inside a package.
    pub fn parse_contents(&self, file_name: &str) -> Result<ContentMap, FilenameError> {
        let parsed = self.parse(file_name)?;
        Ok(single_content(ContentAttributes::new(
            parsed.title_id,
            parsed.version,
        )))
    }
}

/// Human-readable title: the part of the filename before the first `[`.
///
/// Display only; nothing relies on this for identification.
pub fn display_title(file_name: &str) -> &str {
    match file_name.find('[') {
        Some(pos) => file_name[..pos].trim_end(),
        None => file_name,
    }
}
