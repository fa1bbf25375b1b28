use super::*;

use crate::model::RawNode;

fn tree() -> TreeSynchronizer {
    let mut t = TreeSynchronizer::new();
    let ticket = t.begin_refresh();
    t.complete_refresh(
        ticket,
        Ok(vec![RawNode::folder(
            "root",
            vec![RawNode::folder("docs", vec![RawNode::file("a.pdf")])],
        )]),
    )
    .unwrap();
    t
}

#[test]
fn bulk_action_words() {
    assert_eq!(parse_bulk_action("SYNC").unwrap(), BulkAction::Sync);
    assert_eq!(parse_bulk_action("wipe").unwrap(), BulkAction::Wipe);
    assert!(parse_bulk_action("nuke").unwrap_err().contains("expected sync or wipe"));
}

#[test]
fn upload_parent_follows_selection() {
    let mut t = tree();
    assert_eq!(upload_parent(&t, None), None);
    assert_eq!(upload_parent(&t, Some(" root/x/ ")).as_deref(), Some("root/x"));

    t.select(Some("root/docs"));
    assert_eq!(upload_parent(&t, None).as_deref(), Some("root/docs"));

    t.select(Some("root/docs/a.pdf"));
    assert_eq!(upload_parent(&t, None).as_deref(), Some("root/docs"));
}

#[test]
fn join_child_handles_root_and_slashes() {
    assert_eq!(join_child("", "a.txt"), "a.txt");
    assert_eq!(join_child("root/", "/a.txt"), "root/a.txt");
}

#[test]
fn help_lists_every_command_and_explains_one() {
    let all = help_lines(None).unwrap();
    assert!(all.len() > command_defs().len());
    let one = help_lines(Some("rename")).unwrap();
    assert_eq!(one[0], "mv <old> <new>");
    assert_eq!(one.last().map(String::as_str), Some("aliases: rename"));
    assert!(help_lines(Some("bogus")).is_err());
}
