//! Ingestion dashboard: recent activity, stats and the two bulk actions.

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{DeskError, Result};
use crate::model::{
    ALL_SENTINEL, DashboardConfig, DocStatus, IngestionStats, StatusMap, StatusRow, SyncAction,
    SyncTarget,
};
use crate::remote::IngestionRemote;
use crate::selection::{StatusFilter, TargetSelector};
use crate::status::StatusCache;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkAction {
    Sync,
    Wipe,
}

impl BulkAction {
    pub fn as_str(self) -> &'static str {
        match self {
            BulkAction::Sync => "sync",
            BulkAction::Wipe => "wipe",
        }
    }
}

#[derive(Debug)]
pub struct IngestionDashboard {
    statuses: StatusCache,
    sync: TargetSelector,
    wipe: TargetSelector,
    stats: IngestionStats,
    activity: Vec<StatusRow>,
    activity_limit: usize,
    loading: bool,
    syncing: bool,
    wiping: bool,
    error: Option<String>,
}

impl IngestionDashboard {
    pub fn new(cfg: &DashboardConfig) -> Self {
        Self {
            statuses: StatusCache::new(cfg.status_limit),
            // Learned documents have nothing left to ingest; only they can be wiped.
            sync: TargetSelector::new("sync", StatusFilter::Exclude(vec![DocStatus::Learned])),
            wipe: TargetSelector::new("wipe", StatusFilter::Include(DocStatus::Learned)),
            stats: IngestionStats::default(),
            activity: Vec::new(),
            activity_limit: cfg.activity_limit,
            loading: false,
            syncing: false,
            wiping: false,
            error: None,
        }
    }

    pub fn stats(&self) -> &IngestionStats {
        &self.stats
    }

    pub fn activity(&self) -> &[StatusRow] {
        &self.activity
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_busy(&self, action: BulkAction) -> bool {
        match action {
            BulkAction::Sync => self.syncing,
            BulkAction::Wipe => self.wiping,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selector(&self, action: BulkAction) -> &TargetSelector {
        match action {
            BulkAction::Sync => &self.sync,
            BulkAction::Wipe => &self.wipe,
        }
    }

    fn selector_mut(&mut self, action: BulkAction) -> &mut TargetSelector {
        match action {
            BulkAction::Sync => &mut self.sync,
            BulkAction::Wipe => &mut self.wipe,
        }
    }

    pub fn status_map(&self) -> Option<&StatusMap> {
        self.statuses.current()
    }

    /// Reloads recent activity and stats, then marks the status map stale.
    pub fn load<R: IngestionRemote + ?Sized>(&mut self, remote: &R) -> Result<()> {
        self.loading = true;
        let result = remote.list_status(self.activity_limit, None);
        self.loading = false;
        match result {
            Ok(listing) => {
                self.stats = listing.stats();
                self.activity = listing.into_rows();
                self.error = None;
                self.statuses.invalidate();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "dashboard load failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetches the status map if stale and prunes selections that stopped
    /// being eligible.
    pub fn refresh_statuses<R: IngestionRemote + ?Sized>(&mut self, remote: &R) -> Result<()> {
        let map = self.statuses.get_or_fetch(remote)?;
        let dropped = self.sync.retain_eligible(map) + self.wipe.retain_eligible(map);
        if dropped > 0 {
            info!(dropped, "selection pruned after status refresh");
        }
        Ok(())
    }

    /// Ids currently selectable for `action`.
    pub fn candidates<R: IngestionRemote + ?Sized>(
        &mut self,
        remote: &R,
        action: BulkAction,
    ) -> Result<Vec<String>> {
        self.refresh_statuses(remote)?;
        let map = self.statuses.get_or_fetch(remote)?;
        let selector = match action {
            BulkAction::Sync => &self.sync,
            BulkAction::Wipe => &self.wipe,
        };
        Ok(selector.eligible(map))
    }

    /// Toggles `id` (or `ALL`) on the selector for `action`. Adding an id
    /// requires it to be eligible; removing one never does.
    pub fn toggle<R: IngestionRemote + ?Sized>(
        &mut self,
        remote: &R,
        action: BulkAction,
        id: &str,
    ) -> Result<()> {
        let id = id.trim();
        if id == ALL_SENTINEL {
            self.selector_mut(action).toggle_all();
            return Ok(());
        }
        if id.is_empty() {
            return Err(DeskError::validation("document id is required"));
        }
        if !self.selector(action).selection().contains(id) {
            let map = self.statuses.get_or_fetch(remote)?;
            let selector = match action {
                BulkAction::Sync => &self.sync,
                BulkAction::Wipe => &self.wipe,
            };
            if !selector.is_eligible(map, id) {
                return Err(DeskError::validation(format!(
                    "document {} is not eligible to {}",
                    id,
                    action.as_str()
                )));
            }
        }
        self.selector_mut(action).toggle(id);
        Ok(())
    }

    pub fn toggle_sync<R: IngestionRemote + ?Sized>(&mut self, remote: &R, id: &str) -> Result<()> {
        self.toggle(remote, BulkAction::Sync, id)
    }

    pub fn toggle_wipe<R: IngestionRemote + ?Sized>(&mut self, remote: &R, id: &str) -> Result<()> {
        self.toggle(remote, BulkAction::Wipe, id)
    }

    pub fn clear_selection(&mut self, action: BulkAction) {
        self.selector_mut(action).clear();
    }

    /// Sends the sync selection. Returns a short confirmation line.
    pub fn submit_sync<R: IngestionRemote + ?Sized>(
        &mut self,
        remote: &R,
        action: Option<SyncAction>,
    ) -> Result<String> {
        if self.syncing {
            return Err(DeskError::validation("a sync is already in progress"));
        }
        let target = self.sync.to_sync_target(action)?;

        self.syncing = true;
        let result = remote.sync(&target);
        self.syncing = false;
        result?;

        info!(target = %target.describe(), "sync submitted");
        self.sync.clear();
        self.after_bulk(remote);
        Ok(target.describe())
    }

    /// Syncs one document regardless of the current selection.
    pub fn sync_document<R: IngestionRemote + ?Sized>(
        &mut self,
        remote: &R,
        document_id: &str,
    ) -> Result<String> {
        let document_id = document_id.trim();
        if document_id.is_empty() {
            return Err(DeskError::validation("document id is required"));
        }
        if self.syncing {
            return Err(DeskError::validation("a sync is already in progress"));
        }
        let target = SyncTarget::Single(document_id.to_string());

        self.syncing = true;
        let result = remote.sync(&target);
        self.syncing = false;
        result?;

        info!(document_id, "single document sync submitted");
        self.after_bulk(remote);
        Ok(target.describe())
    }

    pub fn submit_wipe<R: IngestionRemote + ?Sized>(&mut self, remote: &R) -> Result<String> {
        if self.wiping {
            return Err(DeskError::validation("a wipe is already in progress"));
        }
        let target = self.wipe.to_wipe_target()?;

        self.wiping = true;
        let result = remote.wipe(&target);
        self.wiping = false;
        result?;

        info!(target = %target.describe(), "wipe submitted");
        self.wipe.clear();
        self.after_bulk(remote);
        Ok(target.describe())
    }

    pub fn file_status<R: IngestionRemote + ?Sized>(
        &self,
        remote: &R,
        document_id: &str,
    ) -> Result<Value> {
        let document_id = document_id.trim();
        if document_id.is_empty() {
            return Err(DeskError::validation("document id is required"));
        }
        remote.file_status(document_id)
    }

    /// The bulk call itself succeeded; a failed reload only shows up in `error`.
    fn after_bulk<R: IngestionRemote + ?Sized>(&mut self, remote: &R) {
        self.statuses.invalidate();
        if let Err(e) = self.load(remote) {
            warn!(error = %e, "dashboard reload after bulk action failed");
        }
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
