//! Issue tracker port.

use crate::student::domain::IssueLocator;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Mutations the bot performs on tracker issues.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Removes `label` from the issue.
    ///
    /// Returns `false` when the issue did not carry the label.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker rejects the call.
    async fn remove_label(&self, issue: &IssueLocator, label: &str) -> TrackerResult<bool>;

    /// Removes `login` from the issue's assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker rejects the call.
    async fn remove_assignee(&self, issue: &IssueLocator, login: &str) -> TrackerResult<()>;

    /// Posts `body` as a new comment on the issue.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker rejects the call.
    async fn create_comment(&self, issue: &IssueLocator, body: &str) -> TrackerResult<()>;
}

/// Errors returned by tracker adapters.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The request could not be sent or the response could not be read.
    #[error("tracker {operation} request failed: {source}")]
    Transport {
        /// Operation that was attempted.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The tracker answered with a non-success status.
    #[error("tracker {operation} failed with status {status}: {body}")]
    Status {
        /// Operation that was attempted.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The tracker API base URL cannot address issues.
    #[error("invalid tracker api base url '{0}'")]
    InvalidBaseUrl(String),
}

impl TrackerError {
    /// Wraps a transport failure.
    pub fn transport(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            operation,
            source: Arc::new(err),
        }
    }
}
