//! Scanning a local library of Switch packages.
//!
//! [`LibraryScanner`] walks the library folders, resolves metadata for each
//! package through a [`MetadataResolver`] (cache, structural parsers,
//! filename fallback) and classifies the results into a
//! [`LocalLibrary`](switch_shelf_catalog::LocalLibrary).

pub mod error;
pub mod keys;
pub mod library;
pub mod parsers;
pub mod resolver;
pub mod scanner;
pub mod settings;

pub use error::{KeysError, ResolveError, ScanError, SettingsError};
pub use keys::KeySet;
pub use library::{APP_VERSION, LibraryScanner, clear_cache, open_cache};
pub use parsers::ContainerParsers;
pub use resolver::{MetadataResolver, MetadataSource, Resolved};
pub use scanner::discover_files;
pub use settings::{Settings, default_database_path, settings_path};

