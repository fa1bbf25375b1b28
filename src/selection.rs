//! Which documents a bulk sync/wipe applies to.

use std::collections::BTreeSet;

use crate::error::{DeskError, Result};
use crate::model::{ALL_SENTINEL, DocStatus, StatusMap, SyncAction, SyncTarget, WipeTarget, doc_count};

pub const SELECT_PLACEHOLDER: &str = "Select documents";

/// Either every eligible document or an explicit id set, never both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    AllDocuments,
    Explicit(BTreeSet<String>),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Explicit(BTreeSet::new())
    }
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::AllDocuments => false,
            Selection::Explicit(ids) => ids.is_empty(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::AllDocuments)
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            Selection::Explicit(ids) => ids.contains(id),
            _ => false,
        }
    }

    pub fn ids(&self) -> Vec<String> {
        match self {
            Selection::Explicit(ids) => ids.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

/// Which statuses make a document selectable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Any,
    Include(DocStatus),
    Exclude(Vec<DocStatus>),
}

impl StatusFilter {
    pub fn admits(&self, status: &DocStatus) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Include(s) => s == status,
            StatusFilter::Exclude(list) => !list.contains(status),
        }
    }

    pub fn eligible(&self, map: &StatusMap) -> Vec<String> {
        map.iter()
            .filter(|(_, status)| self.admits(status))
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct TargetSelector {
    action_label: String,
    filter: StatusFilter,
    selection: Selection,
}

impl TargetSelector {
    pub fn new(action_label: &str, filter: StatusFilter) -> Self {
        Self {
            action_label: action_label.to_string(),
            filter,
            selection: Selection::default(),
        }
    }

    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn eligible(&self, map: &StatusMap) -> Vec<String> {
        self.filter.eligible(map)
    }

    pub fn is_eligible(&self, map: &StatusMap, id: &str) -> bool {
        map.get(id).is_some_and(|s| self.filter.admits(s))
    }

    pub fn toggle_all(&mut self) {
        self.selection = if self.selection.is_all() {
            Selection::default()
        } else {
            Selection::AllDocuments
        };
    }

    /// Removes a selected id or adds it, dropping the ALL state when adding.
    /// The `ALL` sentinel flips the whole-set state instead.
    pub fn toggle(&mut self, id: &str) {
        if id == ALL_SENTINEL {
            self.toggle_all();
            return;
        }
        let mut ids = match std::mem::take(&mut self.selection) {
            Selection::Explicit(ids) => ids,
            Selection::AllDocuments => BTreeSet::new(),
        };
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        self.selection = Selection::Explicit(ids);
    }

    pub fn clear(&mut self) {
        self.selection = Selection::default();
    }

    /// Drops explicit ids that are no longer eligible. Returns how many went.
    pub fn retain_eligible(&mut self, map: &StatusMap) -> usize {
        let Selection::Explicit(ids) = &mut self.selection else {
            return 0;
        };
        let before = ids.len();
        let filter = &self.filter;
        ids.retain(|id| map.get(id).is_some_and(|s| filter.admits(s)));
        before - ids.len()
    }

    pub fn summary(&self) -> String {
        match &self.selection {
            Selection::AllDocuments => format!("ALL docs to {}", self.action_label),
            Selection::Explicit(ids) if !ids.is_empty() => {
                format!("{} to {}", doc_count(ids.len()), self.action_label)
            }
            _ => SELECT_PLACEHOLDER.to_string(),
        }
    }

    pub fn to_sync_target(&self, action: Option<SyncAction>) -> Result<SyncTarget> {
        match &self.selection {
            Selection::AllDocuments => Ok(SyncTarget::All { action }),
            Selection::Explicit(ids) if !ids.is_empty() => {
                Ok(SyncTarget::Many(ids.iter().cloned().collect()))
            }
            _ => Err(nothing_selected()),
        }
    }

    pub fn to_wipe_target(&self) -> Result<WipeTarget> {
        match &self.selection {
            Selection::AllDocuments => Ok(WipeTarget::All),
            Selection::Explicit(ids) if !ids.is_empty() => {
                Ok(WipeTarget::Ids(ids.iter().cloned().collect()))
            }
            _ => Err(nothing_selected()),
        }
    }
}

fn nothing_selected() -> DeskError {
    DeskError::validation("Please select at least one document")
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
