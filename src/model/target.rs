use serde::{Deserialize, Serialize};

pub const ALL_SENTINEL: &str = "ALL";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncAction {
    Ingest,
    Retry,
    Resume,
}

impl std::str::FromStr for SyncAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ingest" => Ok(SyncAction::Ingest),
            "retry" => Ok(SyncAction::Retry),
            "resume" => Ok(SyncAction::Resume),
            other => Err(format!(
                "unknown sync action '{}' (expected ingest, retry or resume)",
                other
            )),
        }
    }
}

/// What a sync request applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncTarget {
    All { action: Option<SyncAction> },
    Single(String),
    Many(Vec<String>),
}

impl SyncTarget {
    pub fn describe(&self) -> String {
        match self {
            SyncTarget::All { .. } => "All documents queued for ingestion".to_string(),
            SyncTarget::Single(_) => "1 doc queued for ingestion".to_string(),
            SyncTarget::Many(ids) => format!("{} queued for ingestion", doc_count(ids.len())),
        }
    }
}

/// What a wipe request applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WipeTarget {
    All,
    Ids(Vec<String>),
}

impl WipeTarget {
    pub fn describe(&self) -> String {
        match self {
            WipeTarget::All => "All documents scheduled for deletion".to_string(),
            WipeTarget::Ids(ids) => format!("{} scheduled for deletion", doc_count(ids.len())),
        }
    }
}

pub fn doc_count(n: usize) -> String {
    if n == 1 {
        "1 doc".to_string()
    } else {
        format!("{} docs", n)
    }
}
