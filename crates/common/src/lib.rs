//! Core building blocks for FastDoc: a sandboxed, watched directory of
//! markdown and HTML documents with an in-memory search index.

// Document state
pub mod index;
pub mod sandbox;
pub mod search;
pub mod store;

// Filesystem observation
pub mod watch;

// Build metadata
pub mod version;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::index::{DocMeta, FileIndex, IndexEntry, SharedIndex};
    pub use crate::sandbox::PathGuard;
    pub use crate::search::SearchHit;
    pub use crate::store::{DocumentStore, StoreError, StoredDoc};
    pub use crate::watch::{WatchBridge, WatchEvent, WatchKind, WatchSource};
}
