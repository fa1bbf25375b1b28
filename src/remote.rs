use serde_json::Value;
use tracing::debug;

use crate::error::{DeskError, Result};
use crate::model::{
    DocStatus, Identity, RawNode, RemoteConfig, StatusListing, SyncTarget, WipeTarget,
};

mod http_client;

mod types;
pub use self::types::*;
mod assistant;
pub use self::assistant::format_answer;
mod content;
mod contracts;
pub use self::contracts::*;
mod ingestion;
mod tree_ops;

pub struct RemoteClient {
    remote: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent("docdesk");
        if let Some(secs) = remote.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| DeskError::transport("build http client", e))?;
        Ok(Self { remote, client })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}
