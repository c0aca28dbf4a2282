//! Title identifiers and the content attributes resolved for a package.
//!
//! A title id is a 16-character code. The last four characters encode the
//! role of the content: `...000` is the base game, `...800` its update, and
//! anything else is a DLC. Stripping those four characters yields the prefix
//! shared by every package belonging to one title.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of trailing characters that encode the content role.
const ROLE_SUFFIX_LEN: usize = 4;

/// Error returned when a string is not a valid title id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleIdError {
    #[error("title id must be {expected} characters, got {actual} ('{value}')")]
    WrongLength {
        expected: usize,
        actual: usize,
        value: String,
    },
    #[error("title id contains non-alphanumeric characters: '{0}'")]
    InvalidCharacter(String),
}

/// A normalized (lowercase) 16-character alphanumeric title id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TitleId(String);

impl TitleId {
    /// Length of every title id.
    pub const LEN: usize = 16;

    /// Validate and normalize a title id.
    pub fn parse(value: &str) -> Result<Self, TitleIdError> {
        let trimmed = value.trim();
        if trimmed.len() != Self::LEN {
            return Err(TitleIdError::WrongLength {
                expected: Self::LEN,
                actual: trimmed.len(),
                value: trimmed.to_string(),
            });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TitleIdError::InvalidCharacter(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id with its role suffix stripped. All packages of one title
    /// (base, update, DLC) share this prefix.
    pub fn prefix(&self) -> &str {
        &self.0[..Self::LEN - ROLE_SUFFIX_LEN]
    }

    /// The four role characters at the end of the id.
    pub fn suffix(&self) -> &str {
        &self.0[Self::LEN - ROLE_SUFFIX_LEN..]
    }

    pub fn content_type(&self) -> ContentType {
        ContentType::from_title_id(&self.0)
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TitleId {
    type Err = TitleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TitleId {
    type Error = TitleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TitleId> for String {
    fn from(id: TitleId) -> Self {
        id.0
    }
}

/// Role of a package within its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Base,
    Update,
    Dlc,
}

impl ContentType {
    /// Derive the role from a title id's suffix convention.
    ///
    /// `800` marks an update and `000` a base game; every other suffix is
    /// a DLC.
    pub fn from_title_id(title_id: &str) -> Self {
        if title_id.ends_with("800") {
            Self::Update
        } else if title_id.ends_with("000") {
            Self::Base
        } else {
            Self::Dlc
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Update => "Update",
            Self::Dlc => "DLC",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Metadata describing one content entry inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAttributes {
    pub title_id: TitleId,

    /// Numeric version, increasing with every update of a title.
    pub version: u64,

    /// Role, derived once from the title id suffix.
    pub content_type: ContentType,

    /// Display name from the package's control data, when a structural
    /// parser could read it.
    #[serde(default)]
    pub name: Option<String>,

    /// Human-facing version string (e.g. "1.0.2").
    #[serde(default)]
    pub display_version: Option<String>,
}

impl ContentAttributes {
    pub fn new(title_id: TitleId, version: u64) -> Self {
        let content_type = title_id.content_type();
        Self {
            title_id,
            version,
            content_type,
            name: None,
            display_version: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_display_version(mut self, version: impl Into<String>) -> Self {
        self.display_version = Some(version.into());
        self
    }
}

/// Every content entry found in one package, keyed by title id.
///
/// A `BTreeMap` keeps iteration order stable, so multi-content packages are
/// classified in the same order on every run.
pub type ContentMap = BTreeMap<TitleId, ContentAttributes>;

/// Build a content map holding a single entry.
pub fn single_content(attributes: ContentAttributes) -> ContentMap {
    let mut map = ContentMap::new();
    map.insert(attributes.title_id.clone(), attributes);
    map
}

#[cfg(test)]
#[path = "tests/title_tests.rs"]
mod tests;
