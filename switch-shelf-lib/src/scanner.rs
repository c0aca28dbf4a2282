//! File discovery across library folders.
//!
//! Entries are visited in file-name order so that a scan of the same tree
//! always yields the same sequence. Hidden files (leading `.`) are ignored,
//! directories are never emitted and a file reachable from several folders
//! is emitted once.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use switch_shelf_core::{DiscoveredFile, ProgressSink, ScanProgress};
use walkdir::WalkDir;

/// Collect the files under `folders`, in order.
///
/// Without `recursive` only the immediate children of each folder are
/// considered. Unreadable entries and missing folders are logged and
/// skipped.
pub fn discover_files(
    folders: &[PathBuf],
    recursive: bool,
    progress: Option<&dyn ProgressSink>,
) -> Vec<DiscoveredFile> {
    let mut files = Vec::new();
    let mut seen = BTreeSet::new();
    let milestones = folders.len() + 1;

    for (i, folder) in folders.iter().enumerate() {
        let before = files.len();
        scan_folder(folder, recursive, progress, &mut seen, &mut files);
        log::debug!(
            "Found {} files in {}",
            files.len() - before,
            folder.display()
        );
        if let Some(sink) = progress {
            sink.update(ScanProgress::step(
                i + 1,
                milestones,
                format!("scanning files in {}", folder.display()),
            ));
        }
    }

    files
}

fn scan_folder(
    folder: &Path,
    recursive: bool,
    progress: Option<&dyn ProgressSink>,
    seen: &mut BTreeSet<PathBuf>,
    files: &mut Vec<DiscoveredFile>,
) {
    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("Error while scanning {}: {}", folder.display(), e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let key = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
        if !seen.insert(key) {
            log::debug!("{} already discovered, ignoring", entry.path().display());
            continue;
        }

        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                log::error!("Cannot read {}: {}", entry.path().display(), e);
                continue;
            }
        };

        if let Some(sink) = progress {
            sink.update(ScanProgress::message(format!("scanning {}", name)));
        }

        let mut file = DiscoveredFile::new(entry.path(), meta.len());
        file.modified = meta.modified().ok();
        files.push(file);
    }
}
