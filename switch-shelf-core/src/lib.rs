//! Shared types for cataloging Switch package files.
//!
//! Holds the vocabulary every other crate speaks: title ids and their
//! content roles, the files found on disk, and the seam through which
//! structural container parsers plug in.

pub mod container;
pub mod file;
pub mod progress;
pub mod title;
pub mod util;

pub use container::{ContainerError, ContainerParser};
pub use file::{ContainerKind, DiscoveredFile, FileKind};
pub use progress::{ProgressSink, ScanProgress};
pub use title::{
    ContentAttributes, ContentMap, ContentType, TitleId, TitleIdError, single_content,
};
