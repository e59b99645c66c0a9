//! Document lifecycle across the store, watcher bridge, index, and
//! search: the full add/list/search/read/delete loop as the HTTP API
//! drives it.

mod common;

use std::fs;

use ::common::search;
use ::common::store::StoreError;
use ::common::watch::WatchEvent;

#[test]
fn test_upload_search_delete_roundtrip() {
    let env = common::setup();

    let doc = env.store.upload("notes.md", "# Notes\nhello world").unwrap();
    assert_eq!(doc.path, "notes.md");
    assert_eq!(doc.ext, "md");

    // uploads become visible once the watcher reports the new file
    env.bridge.apply(&WatchEvent::added(env.root.join("notes.md")));

    let docs = env.index.read().list();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "notes.md");
    assert!(docs[0].mtime > 0);

    let hits = search::search(&env.index.read(), "hello");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "notes.md");
    assert!(hits[0].snippet.contains("hello world"));

    // deletes are visible immediately, no watch event required
    env.store.delete("notes.md").unwrap();
    assert!(env.index.read().list().is_empty());
    assert!(search::search(&env.index.read(), "hello").is_empty());
    assert!(!env.root.join("notes.md").exists());
}

#[test]
fn test_register_then_index_then_read() {
    let env = common::setup();
    let outside = tempfile::TempDir::new().unwrap();
    let source = outside.path().join("Guide.MD");
    fs::write(&source, "how to fastdoc").unwrap();

    let doc = env.store.register(&source).unwrap();
    assert_eq!(doc.path, "Guide.MD");
    assert_eq!(doc.name, "Guide.MD");
    assert_eq!(doc.ext, "md");

    env.bridge.apply(&WatchEvent::added(env.root.join("Guide.MD")));
    let entry_content = env
        .index
        .read()
        .get("Guide.MD")
        .map(|e| e.content.clone())
        .unwrap();
    assert_eq!(entry_content, "how to fastdoc");
}

#[test]
fn test_register_unsupported_extension_leaves_no_trace() {
    let env = common::setup();
    let outside = tempfile::TempDir::new().unwrap();
    let source = outside.path().join("report.txt");
    fs::write(&source, "plain text").unwrap();

    let err = env.store.register(&source).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    // no file copied, nothing indexed
    assert!(fs::read_dir(&env.root).unwrap().next().is_none());
    assert!(env.index.read().is_empty());
}

#[test]
fn test_upload_overwrite_is_reflected_after_change_event() {
    let env = common::setup();
    env.store.upload("draft.md", "version one").unwrap();
    env.bridge.apply(&WatchEvent::added(env.root.join("draft.md")));

    env.store.upload("draft.md", "version two").unwrap();
    env.bridge.apply(&WatchEvent::changed(env.root.join("draft.md")));

    let docs = env.index.read().list();
    assert_eq!(docs.len(), 1);
    assert!(search::search(&env.index.read(), "version two").len() == 1);
    assert!(search::search(&env.index.read(), "version one").is_empty());
}

#[test]
fn test_traversal_paths_never_reach_the_filesystem() {
    let env = common::setup();
    for candidate in ["../escape.md", "a/../../escape.md", "/etc/passwd"] {
        assert!(!env.guard.is_safe(candidate), "{candidate} should be unsafe");
        let err = env.store.delete(candidate).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}

#[test]
fn test_deleting_unindexed_but_present_file_still_works() {
    let env = common::setup();
    // file exists on disk but the watcher has not delivered it yet
    common::write_doc(&env.root, "pending.md", "body");
    env.store.delete("pending.md").unwrap();
    assert!(!env.root.join("pending.md").exists());
}
