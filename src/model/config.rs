use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS_LIMIT: usize = 1000;
pub const DEFAULT_ACTIVITY_LIMIT: usize = 25;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeskConfig {
    pub version: u32,

    pub remote: RemoteConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the folder/tree/file-management API.
    pub tree_url: String,
    /// Base URL of the file content and ingestion API.
    pub api_url: String,
    pub bucket: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl RemoteConfig {
    /// Both APIs served from one base URL (the dev backend does this).
    pub fn single(base_url: &str, bucket: &str) -> Self {
        Self {
            tree_url: base_url.to_string(),
            api_url: base_url.to_string(),
            bucket: bucket.to_string(),
            token: None,
            timeout_secs: None,
        }
    }
}

/// Caller identity required by the file-level endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub user_role: String,
}

impl Identity {
    pub fn new(user_id: &str, user_role: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_role: user_role.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows pulled when building the status map.
    #[serde(default = "default_status_limit")]
    pub status_limit: usize,
    /// Rows pulled for the recent-activity panel.
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            status_limit: DEFAULT_STATUS_LIMIT,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

fn default_status_limit() -> usize {
    DEFAULT_STATUS_LIMIT
}

fn default_activity_limit() -> usize {
    DEFAULT_ACTIVITY_LIMIT
}
