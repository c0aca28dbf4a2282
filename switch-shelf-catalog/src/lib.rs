//! Local library catalog: filename fallback parsing, the catalog data model
//! and the classifier that fills it.

pub mod classifier;
pub mod name_parser;
pub mod types;

pub use classifier::classify;
pub use name_parser::{FilenameError, FilenameParser, ParsedFileName, display_title};
pub use types::*;
