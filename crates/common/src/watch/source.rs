//! notify-backed change feed for the documents directory.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::{is_hidden_under, EventDispatcher, WatchEvent, WatchKind};

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to create filesystem watcher: {0}")]
    Init(#[source] notify::Error),
    #[error("failed to watch {}: {1}", .0.display())]
    Watch(PathBuf, #[source] notify::Error),
}

/// Recursive filesystem watcher over the document root.
///
/// Translates raw notify events into [`WatchEvent`]s and pushes them
/// through the dispatcher. Watching stops when this value is dropped,
/// so the owner must keep it alive for the life of the service.
pub struct WatchSource {
    root: PathBuf,
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for WatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSource").field("root", &self.root).finish()
    }
}

impl WatchSource {
    pub fn start(root: &Path, events: EventDispatcher) -> Result<Self, WatchError> {
        let filter_root = root.to_path_buf();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) => forward(&filter_root, &events, event),
                Err(e) => tracing::warn!(error = %e, "filesystem watcher error"),
            }
        })
        .map_err(WatchError::Init)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Watch(root.to_path_buf(), e))?;
        tracing::info!(root = %root.display(), "watching for document changes");

        Ok(Self {
            root: root.to_path_buf(),
            _watcher: watcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn forward(root: &Path, events: &EventDispatcher, event: Event) {
    let Some(kind) = map_kind(&event.kind) else {
        return;
    };
    for path in event.paths {
        if is_hidden_under(root, &path) {
            continue;
        }
        if let Err(e) = events.dispatch(WatchEvent { kind, path }) {
            tracing::debug!(error = %e, "dropping watch event");
        }
    }
}

fn map_kind(kind: &EventKind) -> Option<WatchKind> {
    match kind {
        EventKind::Create(_) => Some(WatchKind::Added),
        EventKind::Modify(_) => Some(WatchKind::Changed),
        EventKind::Remove(_) => Some(WatchKind::Removed),
        _ => None,
    }
}
