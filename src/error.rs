//! Error type shared by the stores and the remote client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeskError>;

#[derive(Debug, Error)]
pub enum DeskError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The remote answered with a non-success status.
    #[error("{message}")]
    Remote {
        label: String,
        status: u16,
        message: String,
    },

    /// The request never produced a response.
    #[error("{label}: {source}")]
    Transport {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    /// A success status with a body we could not use.
    #[error("{label}: {detail}")]
    Decode { label: String, detail: String },

    /// A mutation went through but the follow-up tree listing did not.
    #[error("{applied}, but refreshing the tree failed: {source}")]
    StaleTree {
        applied: String,
        #[source]
        source: Box<DeskError>,
    },
}

impl DeskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DeskError::Validation(msg.into())
    }

    pub fn decode(label: &str, detail: impl Into<String>) -> Self {
        DeskError::Decode {
            label: label.to_string(),
            detail: detail.into(),
        }
    }

    pub fn transport(label: &str, source: reqwest::Error) -> Self {
        DeskError::Transport {
            label: label.to_string(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DeskError::Validation(_))
    }
}
