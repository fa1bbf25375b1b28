use super::*;
use crate::fakes::{FakeRemote, identity};

fn console(remote: FakeRemote) -> Console<FakeRemote> {
    let mut c = Console::new(remote, Some(identity()), &DashboardConfig::default());
    c.refresh_tree().expect("initial fetch");
    c
}

fn key(path: &str) -> DocumentKey {
    DocumentKey::Path(path.to_string())
}

fn open_paths(c: &Console<FakeRemote>) -> Vec<String> {
    c.session()
        .documents()
        .iter()
        .map(|d| d.path.clone())
        .collect()
}

#[test]
fn fetch_open_rename_scenario() {
    let remote = FakeRemote::new();
    remote.set_listing(vec![crate::model::RawNode::folder(
        "root",
        vec![crate::model::RawNode::file("f.txt")],
    )]);
    let remote = remote.with_file("root/f.txt", "hello");
    let mut c = console(remote);

    let root = &c.tree().nodes()[0];
    assert_eq!(root.path, "root");
    assert_eq!(root.children()[0].path, "root/f.txt");

    c.open_file("root/f.txt").expect("open");
    assert_eq!(open_paths(&c), vec!["root/f.txt"]);
    assert_eq!(c.session().active_index(), Some(0));
    assert_eq!(
        c.session().active().and_then(|d| d.content.as_deref()),
        Some("hello")
    );
}

#[test]
fn rename_refetches_and_relinks_open_tab() {
    let mut c = console(
        FakeRemote::new()
            .with_folder("root")
            .with_file("root/f.txt", "hello"),
    );
    c.open_file("root/f.txt").expect("open");

    let moved = c.rename_item("root/f.txt", "root/g.txt").expect("rename");
    assert_eq!(moved, 1);
    assert!(c.tree().find("root/g.txt").is_some());
    assert!(c.tree().find("root/f.txt").is_none());
    assert_eq!(open_paths(&c), vec!["root/g.txt"]);
    assert_eq!(c.session().documents()[0].name, "g.txt");
    assert_eq!(c.remote().count("fetch_tree"), 2);
}

#[test]
fn reopening_does_not_reread_content() {
    let mut c = console(FakeRemote::new().with_folder("root").with_file("root/f.txt", "x"));
    c.open_file("root/f.txt").expect("open");
    c.open_file("root/f.txt").expect("reopen");
    assert_eq!(c.remote().count("read_file"), 1);
    assert_eq!(c.session().len(), 1);
}

#[test]
fn failed_read_closes_placeholder_tab() {
    let mut c = console(
        FakeRemote::new()
            .with_folder("root")
            .with_file("root/a.txt", "a")
            .with_file("root/empty.txt", ""),
    );
    c.open_file("root/a.txt").expect("open a");
    let err = c.open_file("root/empty.txt").unwrap_err();
    assert!(err.to_string().contains("File content missing"));
    assert_eq!(open_paths(&c), vec!["root/a.txt"]);
    assert_eq!(c.session().active_index(), Some(0));
}

#[test]
fn failed_read_restores_focus_on_earlier_tab() {
    let mut c = console(
        FakeRemote::new()
            .with_folder("root")
            .with_file("root/a.txt", "a")
            .with_file("root/b.txt", "b")
            .with_file("root/empty.txt", ""),
    );
    c.open_file("root/a.txt").expect("open a");
    c.open_file("root/b.txt").expect("open b");
    c.set_active(0).expect("focus a");

    assert!(c.open_file("root/empty.txt").is_err());
    assert_eq!(open_paths(&c), vec!["root/a.txt", "root/b.txt"]);
    assert_eq!(c.session().active_index(), Some(0));
    assert_eq!(c.session().active().map(|d| d.path.as_str()), Some("root/a.txt"));
}

#[test]
fn open_rejects_folders_unknown_paths_and_missing_identity() {
    let remote = FakeRemote::new().with_folder("root").with_file("root/a.txt", "a");
    let mut c = console(remote);
    assert!(c.open_file("root").unwrap_err().is_validation());
    assert!(c.open_file("root/nope.txt").unwrap_err().is_validation());

    let mut anon = Console::new(
        FakeRemote::new().with_folder("root").with_file("root/a.txt", "a"),
        None,
        &DashboardConfig::default(),
    );
    anon.refresh_tree().expect("fetch");
    assert!(anon.open_file("root/a.txt").unwrap_err().is_validation());
    assert_eq!(anon.remote().count("read_file"), 0);
    assert!(anon.session().is_empty());
}

#[test]
fn deleting_folder_closes_tabs_beneath_it() {
    let mut c = console(
        FakeRemote::new()
            .with_folder("root")
            .with_folder("root/tmp")
            .with_file("root/tmp/a.txt", "a")
            .with_file("root/keep.txt", "k"),
    );
    c.open_file("root/tmp/a.txt").expect("open a");
    c.open_file("root/keep.txt").expect("open keep");
    c.open_playground();

    let closed = c.delete_item("root/tmp").expect("delete");
    assert_eq!(closed, 1);
    assert_eq!(
        open_paths(&c),
        vec!["root/keep.txt".to_string(), crate::model::PLAYGROUND_PATH.to_string()]
    );
    assert!(c.tree().find("root/tmp").is_none());
}

#[test]
fn failed_rename_leaves_tabs_alone() {
    let mut c = console(FakeRemote::new().with_folder("root").with_file("root/f.txt", "x"));
    c.open_file("root/f.txt").expect("open");
    c.remote().fail("rename_file", "Rename failed");
    assert!(c.rename_item("root/f.txt", "root/g.txt").is_err());
    assert_eq!(open_paths(&c), vec!["root/f.txt"]);
    assert!(c.session().is_open(&key("root/f.txt")));
}

#[test]
fn ask_opens_playground_and_records_transcript() {
    let mut c = console(FakeRemote::new());
    assert!(c.ask("   ").unwrap_err().is_validation());
    assert_eq!(c.remote().count("ask"), 0);

    let turn = c.ask(" what is x? ").expect("ask").clone();
    assert_eq!(turn.question, "what is x?");
    assert!(turn.answer.contains("echo: what is x?"));
    assert!(c.session().is_open(&DocumentKey::Playground));
    let pane = c.session().get(&DocumentKey::Playground).expect("pane");
    assert!(pane.content.as_deref().is_some_and(|t| t.starts_with("> what is x?")));
}

#[test]
fn toggle_playground_twice_restores_session() {
    let mut c = console(FakeRemote::new());
    assert!(c.toggle_playground());
    assert!(!c.toggle_playground());
    assert!(c.session().is_empty());
}

#[test]
fn bulk_submit_refreshes_tree_and_dashboard() {
    let mut c = console(
        FakeRemote::new()
            .with_folder("root")
            .with_status("d1", "uploaded"),
    );
    c.toggle_target(BulkAction::Sync, "d1").expect("toggle");
    let notice = c.submit_sync(Some(SyncAction::Ingest)).expect("sync");
    assert_eq!(notice, "1 doc queued for ingestion");
    assert_eq!(c.dashboard().stats().learned, 1);
    assert_eq!(c.remote().count("fetch_tree"), 2);
}

#[test]
fn close_active_tab() {
    let mut c = console(
        FakeRemote::new()
            .with_folder("root")
            .with_file("root/a.txt", "a")
            .with_file("root/b.txt", "b"),
    );
    c.open_file("root/a.txt").expect("a");
    c.open_file("root/b.txt").expect("b");
    let closed = c.close_active().expect("closed");
    assert_eq!(closed.path, "root/b.txt");
    assert_eq!(c.session().active().map(|d| d.path.as_str()), Some("root/a.txt"));
}
