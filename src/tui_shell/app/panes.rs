use super::*;

use crate::model::{IngestionStats, OpenDocument, StatusRow};

/// A tree node as laid out in the tree pane.
#[derive(Debug)]
pub(super) struct TreeRow<'a> {
    pub(super) depth: usize,
    pub(super) node: &'a TreeNode,
    pub(super) expanded: bool,
}

/// Depth-first rows; children of collapsed folders are skipped.
pub(super) fn tree_rows<'a>(nodes: &'a [TreeNode], expanded: &BTreeSet<String>) -> Vec<TreeRow<'a>> {
    fn walk<'a>(
        nodes: &'a [TreeNode],
        depth: usize,
        expanded: &BTreeSet<String>,
        out: &mut Vec<TreeRow<'a>>,
    ) {
        for node in nodes {
            let open = node.is_folder() && expanded.contains(&node.path);
            out.push(TreeRow {
                depth,
                node,
                expanded: open,
            });
            if open {
                walk(node.children(), depth + 1, expanded, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, expanded, &mut out);
    out
}

pub(super) fn tree_row_label(row: &TreeRow<'_>) -> String {
    let marker = match (row.node.is_folder(), row.expanded) {
        (true, true) => "v ",
        (true, false) => "> ",
        (false, _) => "  ",
    };
    format!("{}{}{}", "  ".repeat(row.depth), marker, row.node.name)
}

pub(super) fn tab_label(index: usize, doc: &OpenDocument) -> String {
    format!("{}:{} [{}]", index + 1, doc.name, doc.type_label())
}

/// Body of the active tab. `None` content means the read is still pending.
pub(super) fn document_lines(doc: &OpenDocument) -> Vec<String> {
    match (&doc.kind, doc.content.as_deref()) {
        (DocumentKind::Playground, None) | (DocumentKind::Playground, Some("")) => vec![
            "Ask a question about your documents:".to_string(),
            "  ask <question>".to_string(),
        ],
        (_, None) => vec!["(loading...)".to_string()],
        (_, Some(text)) => text.lines().map(str::to_string).collect(),
    }
}

pub(super) fn stats_lines(stats: &IngestionStats, ctx: &RenderCtx) -> Vec<String> {
    let when = |ts: &str| {
        if ts.is_empty() {
            "-".to_string()
        } else {
            fmt_ts_list(ts, ctx)
        }
    };
    vec![
        format!(
            "uploaded {}  learned {}  failed {}",
            stats.total_uploaded, stats.learned, stats.failed
        ),
        format!(
            "last upload {}  last failure {}",
            when(&stats.last_upload),
            when(&stats.last_failed)
        ),
    ]
}

pub(super) fn activity_line(row: &StatusRow, ctx: &RenderCtx) -> String {
    let when = row
        .last_modified
        .as_deref()
        .map(|ts| fmt_ts_list(ts, ctx))
        .unwrap_or_default();
    format!("{: <10} {} {}", row.status.as_str(), row.document_id, when)
}

pub(super) fn status_color(status: &DocStatus) -> Color {
    match status {
        DocStatus::Learned => Color::Green,
        DocStatus::Failed => Color::Red,
        DocStatus::Uploaded => Color::Yellow,
        _ => Color::Gray,
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/panes_tests.rs"]
mod tests;
