//! In-memory index of the documents directory.
//!
//! The index is the single source of truth for reads and searches.
//! Watch events keep it converged with the directory contents; API
//! handlers never read document bytes from disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::sandbox::PathGuard;

/// File extensions eligible for indexing, lowercase.
pub const INDEXED_EXTENSIONS: &[&str] = &["md", "html"];

/// A fully indexed document, content included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Base file name, original casing preserved
    pub name: String,
    /// Lowercased extension, one of [`INDEXED_EXTENSIONS`]
    pub ext: String,
    /// Full document text (lossy UTF-8)
    pub content: String,
    /// Last modification time, milliseconds since the Unix epoch
    pub mtime: u64,
}

/// Content-free document listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    pub name: String,
    pub path: String,
    pub ext: String,
    pub mtime: u64,
}

/// Map of root-relative paths to indexed documents.
#[derive(Debug)]
pub struct FileIndex {
    guard: PathGuard,
    entries: HashMap<String, IndexEntry>,
}

/// Shared handle to the index used across the watcher, the store, and
/// the HTTP handlers. Writers hold the lock only for map mutation.
pub type SharedIndex = Arc<RwLock<FileIndex>>;

pub fn shared(index: FileIndex) -> SharedIndex {
    Arc::new(RwLock::new(index))
}

impl FileIndex {
    pub fn new(guard: PathGuard) -> Self {
        Self {
            guard,
            entries: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.guard.root()
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Indexes or re-indexes the file at an absolute path.
    ///
    /// Anything that is not a regular file with an indexable extension
    /// under the root is skipped. Read failures are logged and leave
    /// the previous entry (if any) in place; the watcher will deliver
    /// a removal if the file is actually gone.
    pub fn upsert(&mut self, path: &Path) {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable path");
                return;
            }
        };
        if !metadata.is_file() {
            return;
        }
        let Some(ext) = indexed_extension(path) else {
            return;
        };
        let Some(rel) = self.guard.relativize(path) else {
            tracing::warn!(path = %path.display(), "ignoring file outside the document root");
            return;
        };

        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(path = %rel, error = %e, "failed to read file for indexing");
                return;
            }
        };
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let name = rel
            .rsplit('/')
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| rel.clone());
        let mtime = epoch_millis(&metadata);

        tracing::debug!(path = %rel, bytes = content.len(), "indexed document");
        self.entries.insert(
            rel,
            IndexEntry {
                name,
                ext,
                content,
                mtime,
            },
        );
    }

    /// Drops the entry for an absolute path, if present.
    pub fn remove(&mut self, path: &Path) {
        if let Some(rel) = self.guard.relativize(path) {
            self.remove_relative(&rel);
        }
    }

    /// Drops the entry for a root-relative path. Returns whether an
    /// entry was actually removed.
    pub fn remove_relative(&mut self, rel: &str) -> bool {
        let removed = self.entries.remove(rel).is_some();
        if removed {
            tracing::debug!(path = %rel, "removed document from index");
        }
        removed
    }

    /// Looks up a document by its root-relative path.
    pub fn get(&self, rel: &str) -> Option<&IndexEntry> {
        self.entries.get(rel)
    }

    /// Listing of every indexed document, sorted by case-insensitive
    /// name with the relative path as tiebreaker.
    pub fn list(&self) -> Vec<DocMeta> {
        let mut docs: Vec<DocMeta> = self
            .entries
            .iter()
            .map(|(path, entry)| DocMeta {
                name: entry.name.clone(),
                path: path.clone(),
                ext: entry.ext.clone(),
                mtime: entry.mtime,
            })
            .collect();
        docs.sort_by_cached_key(|doc| (doc.name.to_lowercase(), doc.path.clone()));
        docs
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercased extension of a path when it is eligible for indexing.
pub fn indexed_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    INDEXED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

fn epoch_millis(metadata: &fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
