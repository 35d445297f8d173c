//! Error types shared by the poller, notifier and config loader

use reqwest::StatusCode;
use thiserror::Error;

/// Failure while querying the search API. Aborts the current tick.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure, including request timeouts
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Search API answered with a non-success status
    #[error("search API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// Response body was not the expected `{"products": [...]}` shape
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// HTTP status of the failed request, when the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::Status { status, .. } => Some(*status),
            Self::Decode(_) => None,
        }
    }
}

/// Failure delivering a single notification. Skips that product only.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure, including request timeouts
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Webhook answered with a non-success status
    #[error("webhook rejected notification ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

/// Invalid startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required field missing or empty
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    /// Field present but unusable
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
