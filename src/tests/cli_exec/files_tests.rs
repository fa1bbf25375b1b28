use super::*;

use docdesk::model::RawNode;
use docdesk::tree::inject_all;

#[test]
fn tree_lines_indent_children_and_mark_folders() {
    let nodes = inject_all(&[
        RawNode::folder("root", vec![RawNode::folder("docs", vec![RawNode::file("a.pdf")])]),
        RawNode::file("readme.txt"),
    ]);
    assert_eq!(
        tree_lines(&nodes),
        vec!["root/", "  docs/", "    a.pdf", "readme.txt"]
    );
}
