//! Filesystem observation for the documents directory.
//!
//! Change notifications flow through a flume channel: the notify-backed
//! [`WatchSource`] and the initial [`scan_existing`] pass produce
//! [`WatchEvent`]s, and a single [`WatchBridge`] applies them to the
//! shared index. Readers see the directory converge shortly after any
//! external change.

use std::path::{Component, Path, PathBuf};

use anyhow::Result;

mod bridge;
mod scan;
mod source;

pub use bridge::WatchBridge;
pub use scan::scan_existing;
pub use source::{WatchError, WatchSource};

/// What happened to a path inside the documents directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    Added,
    Changed,
    Removed,
}

/// A single filesystem change notification.
#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub kind: WatchKind,
    pub path: PathBuf,
}

impl WatchEvent {
    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: WatchKind::Added,
            path: path.into(),
        }
    }

    pub fn changed(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: WatchKind::Changed,
            path: path.into(),
        }
    }

    pub fn removed(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: WatchKind::Removed,
            path: path.into(),
        }
    }
}

/// Event dispatcher that can be cloned and shared across tasks
///
/// Lightweight handle for pushing watch events into the bridge from
/// the watcher callback or anywhere else.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: flume::Sender<WatchEvent>,
}

impl EventDispatcher {
    /// Create a new dispatcher and receiver pair
    ///
    /// The dispatcher can be cloned freely, while the receiver should
    /// be handed to the bridge worker.
    pub fn new() -> (Self, EventReceiver) {
        let (tx, rx) = flume::unbounded();
        (Self { tx }, EventReceiver { rx })
    }

    /// Push an event to the bridge
    ///
    /// Non-blocking; fails only once the receiver has been dropped.
    pub fn dispatch(&self, event: WatchEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("watch event receiver has been dropped"))
    }
}

/// Receiving end of the watch event channel
#[derive(Debug)]
pub struct EventReceiver {
    rx: flume::Receiver<WatchEvent>,
}

impl EventReceiver {
    /// Receive the next event (blocking)
    ///
    /// Returns None when all dispatchers have been dropped.
    pub fn recv(&self) -> Option<WatchEvent> {
        self.rx.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<WatchEvent> {
        self.rx.try_recv().ok()
    }

    /// Stream adapter for async consumers
    pub fn into_async(self) -> flume::r#async::RecvStream<'static, WatchEvent> {
        self.rx.into_stream()
    }
}

/// Whether a path under the watch root has a dot-leading component.
///
/// Hidden files and directories stay invisible to the whole system,
/// so they are dropped here at the observation boundary. Paths that
/// do not sit under the root are treated as hidden too.
pub(crate) fn is_hidden_under(root: &Path, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return true;
    };
    rel.components().any(|component| {
        matches!(
            component,
            Component::Normal(part) if part.to_string_lossy().starts_with('.')
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_and_recv() {
        let (dispatcher, receiver) = EventDispatcher::new();
        dispatcher.dispatch(WatchEvent::added("/tmp/a.md")).unwrap();
        let event = receiver.recv().unwrap();
        assert_eq!(event.kind, WatchKind::Added);
        assert_eq!(event.path, PathBuf::from("/tmp/a.md"));
    }

    #[test]
    fn test_dispatch_fails_after_receiver_drop() {
        let (dispatcher, receiver) = EventDispatcher::new();
        drop(receiver);
        assert!(dispatcher.dispatch(WatchEvent::removed("/tmp/a.md")).is_err());
    }

    #[test]
    fn test_hidden_paths() {
        let root = Path::new("/docs");
        assert!(!is_hidden_under(root, Path::new("/docs/a.md")));
        assert!(!is_hidden_under(root, Path::new("/docs/sub/a.md")));
        assert!(is_hidden_under(root, Path::new("/docs/.hidden.md")));
        assert!(is_hidden_under(root, Path::new("/docs/.git/config.md")));
        assert!(is_hidden_under(root, Path::new("/docs/sub/.draft.md")));
        // outside the root entirely
        assert!(is_hidden_under(root, Path::new("/elsewhere/a.md")));
    }
}
