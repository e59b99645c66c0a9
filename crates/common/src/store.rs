//! Write operations against the documents directory.
//!
//! The store is the only component that mutates files inside the
//! sandbox. New and copied files reach the index through the watcher;
//! deletions also remove the entry synchronously so a delete is
//! immediately visible to readers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::index::{indexed_extension, SharedIndex, INDEXED_EXTENSIONS};
use crate::sandbox::PathGuard;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Malformed or unsafe request input
    #[error("invalid request: {0}")]
    Validation(String),
    /// Target or source file does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// Filesystem operation failed
    #[error("{0}: {1}")]
    Io(String, #[source] std::io::Error),
}

/// Identity of a document that was just written into the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDoc {
    pub path: String,
    pub name: String,
    pub ext: String,
}

/// Validated write access to the documents directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    guard: PathGuard,
    index: SharedIndex,
}

impl DocumentStore {
    pub fn new(guard: PathGuard, index: SharedIndex) -> Self {
        Self { guard, index }
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Copies an existing file from anywhere on disk into the sandbox
    /// under its base name. The extension is validated before the
    /// source is consulted, so an unsupported file reports the same
    /// error whether or not it exists.
    pub fn register(&self, source: &Path) -> Result<StoredDoc, StoreError> {
        if source.as_os_str().is_empty() {
            return Err(StoreError::Validation("source path is required".into()));
        }
        let Some(ext) = indexed_extension(source) else {
            return Err(unsupported_extension());
        };

        let source = absolutize(source)?;
        if !source.is_file() {
            return Err(StoreError::NotFound(format!(
                "source file does not exist: {}",
                source.display()
            )));
        }

        let name = base_name(&source)?;
        let dest = self
            .guard
            .resolve(&name)
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        fs::copy(&source, &dest)
            .map_err(|e| StoreError::Io(format!("failed to copy {}", source.display()), e))?;

        tracing::info!(source = %source.display(), dest = %name, "registered document");
        self.stored_doc(&dest, name, ext)
    }

    /// Writes content into the sandbox under the base name of the
    /// given filename, replacing any previous document silently.
    pub fn upload(&self, filename: &str, content: &str) -> Result<StoredDoc, StoreError> {
        if filename.trim().is_empty() {
            return Err(StoreError::Validation("filename is required".into()));
        }
        let Some(ext) = indexed_extension(Path::new(filename)) else {
            return Err(unsupported_extension());
        };

        let name = base_name(Path::new(filename))?;
        let dest = self
            .guard
            .resolve(&name)
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        fs::write(&dest, content)
            .map_err(|e| StoreError::Io(format!("failed to write {name}"), e))?;

        tracing::info!(dest = %name, bytes = content.len(), "uploaded document");
        self.stored_doc(&dest, name, ext)
    }

    /// Unlinks a document by its sandbox-relative path and removes it
    /// from the index in the same call, so a subsequent listing never
    /// shows the deleted entry.
    pub fn delete(&self, candidate: &str) -> Result<(), StoreError> {
        let dest = self
            .guard
            .resolve(candidate)
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        let rel = self
            .guard
            .relativize(&dest)
            .ok_or_else(|| StoreError::Validation("path names the document root".into()))?;

        if !dest.exists() {
            return Err(StoreError::NotFound(format!("no such document: {rel}")));
        }
        fs::remove_file(&dest).map_err(|e| StoreError::Io(format!("failed to delete {rel}"), e))?;
        self.index.write().remove_relative(&rel);

        tracing::info!(path = %rel, "deleted document");
        Ok(())
    }

    fn stored_doc(&self, dest: &Path, name: String, ext: String) -> Result<StoredDoc, StoreError> {
        let path = self
            .guard
            .relativize(dest)
            .ok_or_else(|| StoreError::Validation("destination resolves outside the root".into()))?;
        Ok(StoredDoc { path, name, ext })
    }
}

fn unsupported_extension() -> StoreError {
    StoreError::Validation(format!(
        "only {} files are supported",
        INDEXED_EXTENSIONS
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(" and ")
    ))
}

fn base_name(path: &Path) -> Result<String, StoreError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| StoreError::Validation("path has no file name".into()))
}

fn absolutize(path: &Path) -> Result<PathBuf, StoreError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = env::current_dir()
            .map_err(|e| StoreError::Io("failed to read working directory".into(), e))?;
        Ok(cwd.join(path))
    }
}
