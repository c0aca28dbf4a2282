//! Library scan driver: discovery, triage, resolution and classification.

use std::path::{Path, PathBuf};

use switch_shelf_catalog::{LocalLibrary, SkipReason, classify};
use switch_shelf_core::{DiscoveredFile, FileKind, ProgressSink, ScanProgress};
use switch_shelf_db::{KvStore, MetadataCache, SqliteStore};

use crate::error::{ResolveError, ScanError};
use crate::resolver::MetadataResolver;
use crate::scanner::discover_files;

/// Version stamped into the metadata cache. A different build drops all
/// cached entries on open.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open the on-disk metadata cache for this build.
///
/// This is the only fatal step of a scan; it must succeed before any file
/// is looked at.
pub fn open_cache(path: &Path) -> Result<MetadataCache<SqliteStore>, ScanError> {
    let store = SqliteStore::open(path)?;
    Ok(MetadataCache::open(store, APP_VERSION)?)
}

/// Drop every entry of the on-disk cache, whatever version wrote it, and
/// return how many there were.
pub fn clear_cache(path: &Path) -> Result<usize, ScanError> {
    let mut cache = MetadataCache::attach(SqliteStore::open(path)?, APP_VERSION);
    let entries = cache.entry_count()?;
    cache.clear()?;
    Ok(entries)
}

/// Builds a [`LocalLibrary`] from folders on disk.
pub struct LibraryScanner<S: KvStore> {
    resolver: MetadataResolver<S>,
    recursive: bool,
}

impl<S: KvStore> LibraryScanner<S> {
    pub fn new(resolver: MetadataResolver<S>) -> Self {
        Self {
            resolver,
            recursive: false,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn resolver(&self) -> &MetadataResolver<S> {
        &self.resolver
    }

    pub fn into_resolver(self) -> MetadataResolver<S> {
        self.resolver
    }

    /// Discover every file under `folders`, then catalog them in discovery
    /// order.
    pub fn scan(&mut self, folders: &[PathBuf], progress: Option<&dyn ProgressSink>) -> LocalLibrary {
        let files = discover_files(folders, self.recursive, progress);
        log::info!("Discovered {} files in {} folder(s)", files.len(), folders.len());

        let library = self.process(&files, progress);

        if let Some(sink) = progress {
            sink.update(ScanProgress::step(files.len(), files.len(), "Complete"));
        }
        library
    }

    /// Catalog an already discovered, ordered list of files.
    pub fn process(&mut self, files: &[DiscoveredFile], progress: Option<&dyn ProgressSink>) -> LocalLibrary {
        let mut library = LocalLibrary::new();
        library.num_files = files.len();

        let total = files.len();
        for (i, file) in files.iter().enumerate() {
            if let Some(sink) = progress {
                sink.update(ScanProgress::step(i + 1, total, format!("process:{}", file.name)));
            }
            self.process_file(&mut library, file);
        }

        library
    }

    fn process_file(&mut self, library: &mut LocalLibrary, file: &DiscoveredFile) {
        let kind = file.kind();

        let unsupported = if file.is_dir {
            Some("directory".to_string())
        } else {
            match kind {
                FileKind::Unsupported => Some("unsupported file type".to_string()),
                FileKind::SplitSegment(part) => Some(format!(
                    "split segment {:02}, metadata is read from segment 00",
                    part
                )),
                FileKind::Container(_) if file.size == 0 => Some("empty file".to_string()),
                FileKind::Container(_) => None,
            }
        };
        if let Some(detail) = unsupported {
            library.skip(file.clone(), SkipReason::UnsupportedType, detail);
            return;
        }

        match self.resolver.resolve(file, kind) {
            Ok(resolved) => {
                log::debug!(
                    "{}: {} content entries from {:?}",
                    file.name,
                    resolved.contents.len(),
                    resolved.source
                );
                classify(library, file, &resolved.contents, kind.is_split());
            }
            Err(e @ ResolveError::Unresolved(_)) => {
                log::warn!("{}: {}", file.name, e);
                library.skip(file.clone(), SkipReason::Unrecognized, e.to_string());
            }
            Err(e @ ResolveError::Malformed { .. }) => {
                log::error!("{}: {}", file.name, e);
                library.skip(file.clone(), SkipReason::MalformedFile, e.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/library_tests.rs"]
mod tests;
