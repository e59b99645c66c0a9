//! Applies watch events to the shared index.

use futures::StreamExt;

use crate::index::SharedIndex;

use super::{WatchEvent, WatchKind};

/// Single consumer of watch events, owning all index mutation.
///
/// Adds and changes re-read the file from disk; events for paths that
/// no longer exist degrade to removals, which keeps the index correct
/// across renames and rapid create/delete sequences.
#[derive(Debug, Clone)]
pub struct WatchBridge {
    index: SharedIndex,
}

impl WatchBridge {
    pub fn new(index: SharedIndex) -> Self {
        Self { index }
    }

    /// Applies one event to the index.
    pub fn apply(&self, event: &WatchEvent) {
        tracing::trace!(kind = ?event.kind, path = %event.path.display(), "watch event");
        match event.kind {
            WatchKind::Added | WatchKind::Changed => {
                if event.path.exists() {
                    self.index.write().upsert(&event.path);
                } else {
                    self.index.write().remove(&event.path);
                }
            }
            WatchKind::Removed => {
                self.index.write().remove(&event.path);
            }
        }
    }

    /// Consumes events until every dispatcher has been dropped.
    pub async fn run(self, mut events: flume::r#async::RecvStream<'static, WatchEvent>) {
        while let Some(event) = events.next().await {
            self.apply(&event);
        }
        tracing::debug!("watch event channel closed");
    }
}
