use serde::{Deserialize, Serialize};

/// One entry of the remote listing, before paths are known.
///
/// The listing is loosely typed: `type` may be missing or carry values we do
/// not recognise, and leaves usually omit `children` entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            node_type: None,
            children: None,
        }
    }

    pub fn folder(name: &str, children: Vec<RawNode>) -> Self {
        Self {
            name: name.to_string(),
            node_type: None,
            children: Some(children),
        }
    }

    /// Explicit `type` wins; otherwise a node with a `children` array is a folder.
    pub fn item_kind(&self) -> ItemKind {
        match self.node_type.as_deref() {
            Some("folder") => ItemKind::Folder,
            Some("file") => ItemKind::File,
            _ if self.children.is_some() => ItemKind::Folder,
            _ => ItemKind::File,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::File => "file",
            ItemKind::Folder => "folder",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Folder { children: Vec<TreeNode> },
    File,
}

impl TreeNode {
    pub fn item_kind(&self) -> ItemKind {
        match self.kind {
            NodeKind::Folder { .. } => ItemKind::Folder,
            NodeKind::File => ItemKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::File => &[],
        }
    }

    /// Depth-first, parents before children.
    pub fn walk<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        out.push(self);
        for child in self.children() {
            child.walk(out);
        }
    }
}
