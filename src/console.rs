//! The console: one tree, one tab session and one dashboard over a backend.
//!
//! This is where the cross-store policy lives. A rename relinks open tabs
//! to the new path and a delete closes tabs under the deleted path, both
//! only after the remote mutation succeeded.

use serde_json::Value;
use tracing::{info, warn};

use crate::dashboard::{BulkAction, IngestionDashboard};
use crate::error::{DeskError, Result};
use crate::model::{DashboardConfig, DocumentKey, Identity, OpenDocument, SyncAction};
use crate::remote::{DeskRemote, format_answer};
use crate::session::SessionMultiplexer;
use crate::tree::TreeSynchronizer;

/// One question/answer exchange with the assistant.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

pub struct Console<R> {
    remote: R,
    identity: Option<Identity>,
    tree: TreeSynchronizer,
    session: SessionMultiplexer,
    dashboard: IngestionDashboard,
    transcript: Vec<ChatTurn>,
}

impl<R: DeskRemote> Console<R> {
    pub fn new(remote: R, identity: Option<Identity>, dashboard: &DashboardConfig) -> Self {
        Self {
            remote,
            identity,
            tree: TreeSynchronizer::new(),
            session: SessionMultiplexer::new(),
            dashboard: IngestionDashboard::new(dashboard),
            transcript: Vec::new(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn tree(&self) -> &TreeSynchronizer {
        &self.tree
    }

    pub fn session(&self) -> &SessionMultiplexer {
        &self.session
    }

    pub fn dashboard(&self) -> &IngestionDashboard {
        &self.dashboard
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn select(&mut self, path: Option<&str>) {
        self.tree.select(path);
    }

    pub fn refresh_tree(&mut self) -> Result<()> {
        self.tree.fetch_tree(&self.remote)
    }

    fn require_identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| DeskError::validation("User ID and role are required"))
    }

    // ---- tabs ----

    /// Opens (or refocuses) the file at `path` and loads its content.
    pub fn open_file(&mut self, path: &str) -> Result<()> {
        let path = path.trim().trim_end_matches('/');
        match self.tree.find(path) {
            Some(node) if node.is_folder() => {
                return Err(DeskError::validation(format!("{} is a folder", path)));
            }
            Some(_) => {}
            None => return Err(DeskError::validation(format!("{} is not in the tree", path))),
        }
        let identity = self.require_identity()?.clone();

        let doc = OpenDocument::file(path);
        let key = doc.key();
        if self.session.is_open(&key) {
            self.session.open(doc);
            return Ok(());
        }

        let previous = self.session.active_index();
        self.session.open(doc);
        match self.remote.read_file(path, &identity) {
            Ok(content) => {
                self.session.set_content(&key, content);
                Ok(())
            }
            Err(e) => {
                warn!(path, error = %e, "read failed; closing tab");
                self.session.close(&key);
                // The placeholder was the tail, so earlier indices are unchanged.
                if let Some(i) = previous {
                    self.session.set_active(i)?;
                }
                Err(e)
            }
        }
    }

    pub fn open_playground(&mut self) {
        self.session.open(OpenDocument::playground());
    }

    /// Returns whether the assistant pane is open afterwards.
    pub fn toggle_playground(&mut self) -> bool {
        self.session.toggle(OpenDocument::playground())
    }

    pub fn close(&mut self, key: &DocumentKey) -> Option<OpenDocument> {
        self.session.close(key)
    }

    pub fn close_active(&mut self) -> Option<OpenDocument> {
        let key = self.session.active()?.key();
        self.session.close(&key)
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        self.session.set_active(index)
    }

    // ---- tree mutations ----

    pub fn create_folder(&mut self, full_path: &str) -> Result<()> {
        self.tree.create_folder(&self.remote, full_path)
    }

    pub fn create_file(&mut self, path: &str) -> Result<()> {
        self.tree
            .create_file(&self.remote, path, self.identity.as_ref())
    }

    pub fn upload_file(&mut self, parent_path: &str, file_name: &str, content: &[u8]) -> Result<String> {
        self.tree.upload_file(
            &self.remote,
            parent_path,
            file_name,
            content,
            self.identity.as_ref(),
        )
    }

    /// Renames on the remote, then points open tabs at the new location.
    pub fn rename_item(&mut self, old_path: &str, new_path: &str) -> Result<usize> {
        self.tree
            .rename_item(&self.remote, old_path, new_path, self.identity.as_ref())?;
        let moved = self.session.relink(old_path.trim(), new_path.trim());
        if moved > 0 {
            info!(moved, from = %old_path, to = %new_path, "open tabs relinked");
        }
        Ok(moved)
    }

    /// Deletes on the remote, then closes tabs at or under the path.
    pub fn delete_item(&mut self, path: &str) -> Result<usize> {
        self.tree
            .delete_item(&self.remote, path, self.identity.as_ref())?;
        let closed = self.session.close_under(path.trim()).len();
        if closed > 0 {
            info!(closed, path = %path, "open tabs closed after delete");
        }
        Ok(closed)
    }

    pub fn download_url(&self, path: &str) -> Result<String> {
        let path = path.trim();
        if path.is_empty() {
            return Err(DeskError::validation("File path is required"));
        }
        self.remote.download_url(path, self.require_identity()?)
    }

    // ---- assistant ----

    /// Asks the assistant and appends the exchange to the transcript.
    pub fn ask(&mut self, question: &str) -> Result<&ChatTurn> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DeskError::validation(
                "Question is required and must be non-empty",
            ));
        }
        self.open_playground();
        let answer = self.remote.ask(question)?;
        let turn = ChatTurn {
            question: question.to_string(),
            answer: format_answer(&answer, question),
        };
        info!(matches = answer.matches.len(), "assistant answered");
        self.transcript.push(turn);
        let text = self.transcript_text();
        self.session.set_content(&DocumentKey::Playground, text);
        Ok(&self.transcript[self.transcript.len() - 1])
    }

    pub fn transcript_text(&self) -> String {
        self.transcript
            .iter()
            .map(|t| format!("> {}\n\n{}", t.question, t.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    // ---- ingestion ----

    pub fn load_dashboard(&mut self) -> Result<()> {
        self.dashboard.load(&self.remote)
    }

    pub fn refresh_statuses(&mut self) -> Result<()> {
        self.dashboard.refresh_statuses(&self.remote)
    }

    pub fn candidates(&mut self, action: BulkAction) -> Result<Vec<String>> {
        self.dashboard.candidates(&self.remote, action)
    }

    pub fn toggle_target(&mut self, action: BulkAction, id: &str) -> Result<()> {
        self.dashboard.toggle(&self.remote, action, id)
    }

    pub fn clear_targets(&mut self, action: BulkAction) {
        self.dashboard.clear_selection(action);
    }

    pub fn submit_sync(&mut self, action: Option<SyncAction>) -> Result<String> {
        let notice = self.dashboard.submit_sync(&self.remote, action)?;
        self.refresh_after_bulk();
        Ok(notice)
    }

    pub fn sync_document(&mut self, document_id: &str) -> Result<String> {
        let notice = self.dashboard.sync_document(&self.remote, document_id)?;
        self.refresh_after_bulk();
        Ok(notice)
    }

    pub fn submit_wipe(&mut self) -> Result<String> {
        let notice = self.dashboard.submit_wipe(&self.remote)?;
        self.refresh_after_bulk();
        Ok(notice)
    }

    pub fn file_status(&self, document_id: &str) -> Result<Value> {
        self.dashboard.file_status(&self.remote, document_id)
    }

    fn refresh_after_bulk(&mut self) {
        if let Err(e) = self.tree.fetch_tree(&self.remote) {
            warn!(error = %e, "tree refresh after bulk action failed");
        }
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
