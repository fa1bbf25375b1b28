use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ingestion lifecycle state of one document.
///
/// Values outside the known set are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocStatus {
    Uploaded,
    Learned,
    Failed,
    Processing,
    Retry,
    Other(String),
}

impl DocStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DocStatus::Uploaded => "uploaded",
            DocStatus::Learned => "learned",
            DocStatus::Failed => "failed",
            DocStatus::Processing => "processing",
            DocStatus::Retry => "retry",
            DocStatus::Other(s) => s,
        }
    }
}

impl From<&str> for DocStatus {
    fn from(s: &str) -> Self {
        match s {
            "uploaded" => DocStatus::Uploaded,
            "learned" => DocStatus::Learned,
            "failed" => DocStatus::Failed,
            "processing" => DocStatus::Processing,
            "retry" => DocStatus::Retry,
            other => DocStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for DocStatus {
    fn from(s: String) -> Self {
        DocStatus::from(s.as_str())
    }
}

impl From<DocStatus> for String {
    fn from(s: DocStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the bulk status listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusRow {
    pub document_id: String,
    pub status: DocStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatusRow {
    pub fn new(document_id: &str, status: DocStatus) -> Self {
        Self {
            document_id: document_id.to_string(),
            status,
            last_modified: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Document id to status, rebuilt wholesale from a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusMap(BTreeMap<String, DocStatus>);

impl StatusMap {
    /// Later rows win when an id repeats.
    pub fn from_rows(rows: &[StatusRow]) -> Self {
        Self(
            rows.iter()
                .map(|r| (r.document_id.clone(), r.status.clone()))
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&DocStatus> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocStatus)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<DocStatus>> FromIterator<(K, V)> for StatusMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

pub const NO_TIMESTAMP: &str = "—";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngestionStats {
    pub total_uploaded: u64,
    pub learned: u64,
    pub failed: u64,
    pub last_upload: String,
    pub last_failed: String,
}

impl IngestionStats {
    /// Rows are expected newest first.
    pub fn from_rows(rows: &[StatusRow]) -> Self {
        let count = |s: DocStatus| rows.iter().filter(|r| r.status == s).count() as u64;
        let last_upload = rows
            .first()
            .and_then(|r| r.last_modified.clone())
            .unwrap_or_else(|| NO_TIMESTAMP.to_string());
        let last_failed = rows
            .iter()
            .find(|r| r.status == DocStatus::Failed)
            .and_then(|r| r.last_modified.clone())
            .unwrap_or_else(|| NO_TIMESTAMP.to_string());
        Self {
            total_uploaded: rows.len() as u64,
            learned: count(DocStatus::Learned),
            failed: count(DocStatus::Failed),
            last_upload,
            last_failed,
        }
    }
}

/// The status listing comes back either as bare rows or as a summary object.
///
/// `Rows` must stay first: serde would otherwise accept a one-row array as a
/// `Summary` sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusListing {
    Rows(Vec<StatusRow>),
    Summary {
        stats: IngestionStats,
        #[serde(default)]
        activity: Vec<StatusRow>,
    },
}

impl StatusListing {
    pub fn rows(&self) -> &[StatusRow] {
        match self {
            StatusListing::Summary { activity, .. } => activity,
            StatusListing::Rows(rows) => rows,
        }
    }

    pub fn into_rows(self) -> Vec<StatusRow> {
        match self {
            StatusListing::Summary { activity, .. } => activity,
            StatusListing::Rows(rows) => rows,
        }
    }

    pub fn stats(&self) -> IngestionStats {
        match self {
            StatusListing::Summary { stats, .. } => stats.clone(),
            StatusListing::Rows(rows) => IngestionStats::from_rows(rows),
        }
    }
}
