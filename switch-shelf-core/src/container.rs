use std::path::Path;

use thiserror::Error;

use crate::file::ContainerKind;
use crate::title::{ContentMap, TitleIdError};

/// Errors a structural parser reports for a package it could not read.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// I/O error while reading the package
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid container of the expected kind
    #[error("Invalid container format: {0}")]
    InvalidFormat(String),

    /// The container holds no readable content metadata
    #[error("Missing content metadata: {0}")]
    MissingMetadata(String),

    /// Content could not be decrypted with the available keys
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// The metadata names an invalid title id
    #[error("Invalid title id: {0}")]
    TitleId(#[from] TitleIdError),
}

impl ContainerError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn missing_metadata(msg: impl Into<String>) -> Self {
        Self::MissingMetadata(msg.into())
    }

    pub fn decryption(msg: impl Into<String>) -> Self {
        Self::Decryption(msg.into())
    }
}

/// Trait for reading content metadata out of a package container.
///
/// Implementors parse the binary structure of one container kind and
/// return every content entry the package holds.
pub trait ContainerParser: Send + Sync {
    /// The container kind this parser reads.
    fn kind(&self) -> ContainerKind;

    /// Read the content metadata of the package at `path`.
    ///
    /// For split packages, `path` is the first segment.
    fn parse(&self, path: &Path) -> Result<ContentMap, ContainerError>;

    /// Name used in log messages.
    fn name(&self) -> &'static str {
        self.kind().display_name()
    }
}
