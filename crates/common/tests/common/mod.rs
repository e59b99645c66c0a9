//! Shared helpers for fastdoc-common integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ::common::index::{self, FileIndex, SharedIndex};
use ::common::sandbox::PathGuard;
use ::common::store::DocumentStore;
use ::common::watch::WatchBridge;

/// A complete core stack over a throwaway documents directory.
pub struct TestEnv {
    pub root: PathBuf,
    pub guard: PathGuard,
    pub index: SharedIndex,
    pub store: DocumentStore,
    pub bridge: WatchBridge,
    _temp: TempDir,
}

pub fn setup() -> TestEnv {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    let guard = PathGuard::new(&root);
    let index = index::shared(FileIndex::new(guard.clone()));
    let store = DocumentStore::new(guard.clone(), index.clone());
    let bridge = WatchBridge::new(index.clone());
    TestEnv {
        root,
        guard,
        index,
        store,
        bridge,
        _temp: temp,
    }
}

/// Writes a document under the root, creating parent directories.
pub fn write_doc(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
