//! Index convergence under synthetic watch event sequences.

mod common;

use std::fs;

use ::common::watch::{scan_existing, WatchEvent};

#[test]
fn test_scan_backfills_existing_tree() {
    let env = common::setup();
    common::write_doc(&env.root, "a.md", "alpha");
    common::write_doc(&env.root, "guides/b.html", "<p>beta</p>");
    common::write_doc(&env.root, "guides/ignored.txt", "gamma");
    common::write_doc(&env.root, ".hidden/c.md", "delta");

    let emitted = scan_existing(&env.root, |event| env.bridge.apply(&event));
    // hidden tree is never visited; the txt file is emitted but the
    // index filters it by extension
    assert_eq!(emitted, 3);

    let paths: Vec<_> = env.index.read().list().into_iter().map(|d| d.path).collect();
    assert_eq!(paths, vec!["a.md", "guides/b.html"]);
}

#[test]
fn test_removal_event_drops_document() {
    let env = common::setup();
    let path = common::write_doc(&env.root, "a.md", "alpha");
    env.bridge.apply(&WatchEvent::added(&path));
    assert_eq!(env.index.read().len(), 1);

    fs::remove_file(&path).unwrap();
    env.bridge.apply(&WatchEvent::removed(&path));
    assert!(env.index.read().is_empty());
}

#[test]
fn test_rename_reported_as_change_acts_as_removal() {
    let env = common::setup();
    let old = common::write_doc(&env.root, "old.md", "body");
    env.bridge.apply(&WatchEvent::added(&old));

    // some platforms report a rename as a change on the old path plus
    // a create on the new one
    let new = env.root.join("new.md");
    fs::rename(&old, &new).unwrap();
    env.bridge.apply(&WatchEvent::changed(&old));
    env.bridge.apply(&WatchEvent::added(&new));

    let paths: Vec<_> = env.index.read().list().into_iter().map(|d| d.path).collect();
    assert_eq!(paths, vec!["new.md"]);
}

#[test]
fn test_rapid_create_delete_settles_empty() {
    let env = common::setup();
    let path = common::write_doc(&env.root, "blip.md", "here and gone");
    fs::remove_file(&path).unwrap();

    // the add event arrives after the file is already gone
    env.bridge.apply(&WatchEvent::added(&path));
    assert!(env.index.read().is_empty());
}

#[test]
fn test_events_for_unsupported_extensions_are_inert() {
    let env = common::setup();
    let path = common::write_doc(&env.root, "notes.txt", "text");
    env.bridge.apply(&WatchEvent::added(&path));
    env.bridge.apply(&WatchEvent::changed(&path));
    assert!(env.index.read().is_empty());
}

#[tokio::test]
async fn test_bridge_worker_applies_streamed_events() {
    let env = common::setup();
    let (dispatcher, receiver) = ::common::watch::EventDispatcher::new();

    let a = common::write_doc(&env.root, "a.md", "first");
    let b = common::write_doc(&env.root, "b.md", "second");
    dispatcher.dispatch(WatchEvent::added(a)).unwrap();
    dispatcher.dispatch(WatchEvent::added(b.clone())).unwrap();
    fs::remove_file(&b).unwrap();
    dispatcher.dispatch(WatchEvent::removed(b)).unwrap();
    drop(dispatcher);

    env.bridge.clone().run(receiver.into_async()).await;

    let paths: Vec<_> = env.index.read().list().into_iter().map(|d| d.path).collect();
    assert_eq!(paths, vec!["a.md"]);
}
