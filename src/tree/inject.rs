use crate::model::{ItemKind, NodeKind, RawNode, TreeNode};

/// Stamps `raw` and its descendants with absolute paths below `parent_path`.
pub fn inject(raw: &RawNode, parent_path: &str) -> TreeNode {
    let path = if parent_path.is_empty() {
        raw.name.clone()
    } else {
        format!("{}/{}", parent_path, raw.name)
    };

    let kind = match raw.item_kind() {
        ItemKind::Folder => NodeKind::Folder {
            children: raw
                .children
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|child| inject(child, &path))
                .collect(),
        },
        ItemKind::File => NodeKind::File,
    };

    TreeNode {
        name: raw.name.clone(),
        path,
        kind,
    }
}

pub fn inject_all(roots: &[RawNode]) -> Vec<TreeNode> {
    roots.iter().map(|r| inject(r, "")).collect()
}
