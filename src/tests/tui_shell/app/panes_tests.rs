use super::*;

use crate::model::RawNode;
use crate::tree::inject_all;

fn sample() -> Vec<TreeNode> {
    inject_all(&[RawNode::folder(
        "root",
        vec![
            RawNode::folder("docs", vec![RawNode::file("a.pdf")]),
            RawNode::file("notes.txt"),
        ],
    )])
}

fn ctx(mode: TimestampMode) -> RenderCtx {
    RenderCtx {
        now: OffsetDateTime::parse("2026-03-01T12:00:00Z", &Rfc3339).unwrap(),
        ts_mode: mode,
    }
}

#[test]
fn collapsed_folders_hide_their_children() {
    let nodes = sample();
    let rows = tree_rows(&nodes, &BTreeSet::new());
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].expanded);

    let expanded: BTreeSet<String> = ["root".to_string()].into_iter().collect();
    let rows = tree_rows(&nodes, &expanded);
    let paths: Vec<&str> = rows.iter().map(|r| r.node.path.as_str()).collect();
    assert_eq!(paths, vec!["root", "root/docs", "root/notes.txt"]);
    assert_eq!(rows[1].depth, 1);
}

#[test]
fn row_labels_indent_and_mark_folders() {
    let nodes = sample();
    let expanded: BTreeSet<String> = ["root".to_string(), "root/docs".to_string()]
        .into_iter()
        .collect();
    let labels: Vec<String> = tree_rows(&nodes, &expanded)
        .iter()
        .map(tree_row_label)
        .collect();
    assert_eq!(
        labels,
        vec!["v root", "  v docs", "      a.pdf", "    notes.txt"]
    );
}

#[test]
fn pending_and_empty_documents_render_placeholders() {
    let doc = OpenDocument::file("root/a.txt");
    assert_eq!(document_lines(&doc), vec!["(loading...)"]);
    let doc = doc.with_content("one\ntwo");
    assert_eq!(document_lines(&doc), vec!["one", "two"]);
    assert_eq!(document_lines(&OpenDocument::playground()).len(), 2);
    assert_eq!(tab_label(0, &OpenDocument::file("root/a.txt")), "1:a.txt [txt]");
}

#[test]
fn activity_rows_use_relative_time() {
    let mut row = StatusRow::new("doc-1", DocStatus::Learned);
    row.last_modified = Some("2026-03-01T11:00:00Z".to_string());
    assert_eq!(
        activity_line(&row, &ctx(TimestampMode::Relative)),
        "learned    doc-1 1h ago"
    );
    assert_eq!(
        activity_line(&row, &ctx(TimestampMode::Absolute)),
        "learned    doc-1 2026-03-01 11:00Z"
    );
}
