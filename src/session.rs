//! Open documents (tabs) and which one has focus.

use tracing::debug;

use crate::error::{DeskError, Result};
use crate::model::{DocumentKey, DocumentKind, OpenDocument};

#[derive(Debug, Default)]
pub struct SessionMultiplexer {
    docs: Vec<OpenDocument>,
    active: usize,
}

impl SessionMultiplexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[OpenDocument] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// `None` when nothing is open.
    pub fn active_index(&self) -> Option<usize> {
        (!self.docs.is_empty()).then_some(self.active)
    }

    pub fn active(&self) -> Option<&OpenDocument> {
        self.active_index().and_then(|i| self.docs.get(i))
    }

    pub fn position(&self, key: &DocumentKey) -> Option<usize> {
        self.docs.iter().position(|d| &d.key() == key)
    }

    pub fn is_open(&self, key: &DocumentKey) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &DocumentKey) -> Option<&OpenDocument> {
        self.position(key).map(|i| &self.docs[i])
    }

    /// Focuses an already-open document with the same key, otherwise appends
    /// `doc` and focuses it. Returns the focused index.
    pub fn open(&mut self, doc: OpenDocument) -> usize {
        if let Some(i) = self.position(&doc.key()) {
            self.active = i;
            return i;
        }
        debug!(path = %doc.path, "tab opened");
        self.docs.push(doc);
        self.active = self.docs.len() - 1;
        self.active
    }

    /// Removes the document with `key`. Closing the active tab or any tab
    /// before it focuses the new last tab; closing a later tab leaves focus.
    pub fn close(&mut self, key: &DocumentKey) -> Option<OpenDocument> {
        let removed_at = self.position(key)?;
        let doc = self.docs.remove(removed_at);
        if removed_at <= self.active || self.active >= self.docs.len() {
            self.active = self.docs.len().saturating_sub(1);
        }
        debug!(path = %doc.path, "tab closed");
        Some(doc)
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.docs.len() {
            return Err(DeskError::validation(format!(
                "tab index {} out of range ({} open)",
                index,
                self.docs.len()
            )));
        }
        self.active = index;
        Ok(())
    }

    /// Closes `doc` if open, opens it otherwise. Returns whether it is now open.
    pub fn toggle(&mut self, doc: OpenDocument) -> bool {
        let key = doc.key();
        if self.is_open(&key) {
            self.close(&key);
            false
        } else {
            self.open(doc);
            true
        }
    }

    /// Fills in content once the read completes. Returns false if the tab
    /// was closed in the meantime.
    pub fn set_content(&mut self, key: &DocumentKey, content: String) -> bool {
        match self.position(key) {
            Some(i) => {
                self.docs[i].content = Some(content);
                true
            }
            None => false,
        }
    }

    /// Points tabs at `old_path` (or below it) to the same place under
    /// `new_path`. Returns how many tabs moved.
    pub fn relink(&mut self, old_path: &str, new_path: &str) -> usize {
        let old_path = old_path.trim_end_matches('/');
        let new_path = new_path.trim_end_matches('/');
        let mut moved = 0;
        for doc in self.docs.iter_mut() {
            if doc.kind == DocumentKind::Playground {
                continue;
            }
            if let Some(rest) = under(&doc.path, old_path) {
                let target = format!("{}{}", new_path, rest);
                debug!(from = %doc.path, to = %target, "tab relinked");
                doc.retarget(target);
                moved += 1;
            }
        }
        moved
    }

    /// Closes every file tab at or below `path`.
    pub fn close_under(&mut self, path: &str) -> Vec<OpenDocument> {
        let path = path.trim_end_matches('/');
        let keys: Vec<DocumentKey> = self
            .docs
            .iter()
            .filter(|d| d.kind != DocumentKind::Playground && under(&d.path, path).is_some())
            .map(|d| d.key())
            .collect();
        keys.iter().filter_map(|k| self.close(k)).collect()
    }

}

/// The remainder of `path` after `prefix` when `path` is `prefix` itself or
/// lies beneath it.
fn under<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
