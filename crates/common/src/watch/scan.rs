//! Initial backfill of the documents directory.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::WatchEvent;

/// Walks the directory tree and emits an `Added` event for every
/// regular file, so existing documents flow through the same path as
/// live changes. Hidden files and directories are skipped entirely;
/// unreadable entries are logged and skipped. Returns the number of
/// events emitted.
pub fn scan_existing(root: &Path, mut emit: impl FnMut(WatchEvent)) -> usize {
    let mut emitted = 0;
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            emit(WatchEvent::added(entry.into_path()));
            emitted += 1;
        }
    }
    emitted
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
