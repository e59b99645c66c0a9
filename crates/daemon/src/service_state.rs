use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::index::{self, FileIndex, SharedIndex};
use common::sandbox::PathGuard;
use common::store::DocumentStore;
use common::watch::{scan_existing, EventDispatcher, WatchBridge, WatchError, WatchSource};

use crate::service_config::Config;

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("failed to prepare docs dir {}: {1}", .0.display())]
    DocsDir(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Watcher(#[from] WatchError),

    #[error("initial scan failed: {0}")]
    Scan(String),
}

/// Main service state - the document index plus everything that keeps
/// it converged with the docs directory.
///
/// Cloning is cheap; all clones share the same index and watcher.
#[derive(Debug, Clone)]
pub struct State {
    index: SharedIndex,
    store: DocumentStore,
    guard: PathGuard,
    docs_dir: PathBuf,
    _watch: Arc<WatchSource>,
}

impl State {
    /// Builds the full document pipeline: sandbox guard, shared index,
    /// store, watcher, and the initial backfill scan.
    ///
    /// The watcher starts before the scan so no change can fall into
    /// the gap between them; re-indexing an already scanned file is
    /// harmless.
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Ensure the docs dir exists and pin down its canonical form
        std::fs::create_dir_all(&config.docs_dir)
            .map_err(|e| StateSetupError::DocsDir(config.docs_dir.clone(), e))?;
        let docs_dir = config
            .docs_dir
            .canonicalize()
            .map_err(|e| StateSetupError::DocsDir(config.docs_dir.clone(), e))?;

        // 2. Core state shared by handlers, store, and watcher
        let guard = PathGuard::new(&docs_dir);
        let index = index::shared(FileIndex::new(guard.clone()));
        let store = DocumentStore::new(guard.clone(), index.clone());
        let bridge = WatchBridge::new(index.clone());

        // 3. Observe first, then backfill through the same bridge
        let (events, receiver) = EventDispatcher::new();
        let watch = WatchSource::start(&docs_dir, events)?;

        let scan_bridge = bridge.clone();
        let scan_root = docs_dir.clone();
        let scanned = tokio::task::spawn_blocking(move || {
            scan_existing(&scan_root, |event| scan_bridge.apply(&event))
        })
        .await
        .map_err(|e| StateSetupError::Scan(e.to_string()))?;
        tracing::info!(
            scanned,
            indexed = index.read().len(),
            docs_dir = %docs_dir.display(),
            "initial scan complete"
        );

        // 4. Live events drain into the index for the service lifetime
        tokio::spawn(bridge.run(receiver.into_async()));

        Ok(Self {
            index,
            store,
            guard,
            docs_dir,
            _watch: Arc::new(watch),
        })
    }

    pub fn index(&self) -> &SharedIndex {
        &self.index
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }
}
