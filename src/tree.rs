//! Canonical in-memory mirror of the remote object store.
//!
//! The tree is never patched locally: every mutation is followed by a full
//! re-fetch, and refreshes are ordered by a request generation so a slow
//! response cannot overwrite a newer one.

use tracing::{debug, info, warn};

use crate::error::{DeskError, Result};
use crate::model::{Identity, ItemKind, RawNode, TreeNode};
use crate::remote::TreeRemote;

mod inject;
mod sync;

pub use self::inject::{inject, inject_all};

/// Handed out by [`TreeSynchronizer::begin_refresh`]; only the newest ticket
/// may replace the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Clone, Copy, Debug)]
pub struct TreeSnapshot<'a> {
    pub nodes: &'a [TreeNode],
    pub loading: bool,
    pub error: Option<&'a str>,
    /// Generation of the listing currently shown (0 before the first fetch).
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct TreeSynchronizer {
    nodes: Vec<TreeNode>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    applied: u64,
    selected: Option<String>,
}

impl TreeSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TreeSnapshot<'_> {
        TreeSnapshot {
            nodes: &self.nodes,
            loading: self.loading,
            error: self.error.as_deref(),
            generation: self.applied,
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let path = path.trim_end_matches('/');
        let mut level = self.nodes.as_slice();
        let mut found = None;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let node = level.iter().find(|n| n.name == segment)?;
            level = node.children();
            found = Some(node);
        }
        found
    }

    /// Every node, depth-first.
    pub fn flatten(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        for root in &self.nodes {
            root.walk(&mut out);
        }
        out
    }

    pub fn select(&mut self, path: Option<&str>) {
        self.selected = path
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn breadcrumb(&self) -> Vec<&str> {
        self.selected
            .as_deref()
            .map(|p| p.split('/').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// File or folder: the tree's own tag when the path is known, otherwise
    /// a dot-extension in the last segment (and no trailing `/`) means file.
    pub fn classify(&self, path: &str) -> ItemKind {
        match self.find(path) {
            Some(node) => node.item_kind(),
            None => classify_path(path),
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.loading = true;
        RefreshTicket(self.issued)
    }

    /// Applies a listing fetched under `ticket`. Returns `Ok(false)` when a
    /// newer refresh was started in the meantime and the result was dropped.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<RawNode>>,
    ) -> Result<bool> {
        if ticket.0 != self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale tree listing"
            );
            return Ok(false);
        }
        self.loading = false;
        match result {
            Ok(raw) => {
                self.nodes = inject_all(&raw);
                self.applied = ticket.0;
                self.error = None;
                debug!(roots = self.nodes.len(), generation = ticket.0, "tree replaced");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "tree fetch failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn fetch_tree<R: TreeRemote + ?Sized>(&mut self, remote: &R) -> Result<()> {
        let ticket = self.begin_refresh();
        let result = remote.fetch_tree();
        self.complete_refresh(ticket, result).map(|_| ())
    }
}

pub fn classify_path(path: &str) -> ItemKind {
    if path.ends_with('/') {
        return ItemKind::Folder;
    }
    let leaf = path.rsplit('/').next().unwrap_or(path);
    match leaf.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ItemKind::File,
        _ => ItemKind::Folder,
    }
}

fn require_identity<'a>(identity: Option<&'a Identity>, what: &str) -> Result<&'a Identity> {
    match identity {
        Some(id) if !id.user_id.trim().is_empty() && !id.user_role.trim().is_empty() => Ok(id),
        _ => Err(DeskError::validation(format!(
            "User ID and role are required to {}",
            what
        ))),
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
