//! Backend ports: student verification and task state transitions.

use crate::student::domain::{ActiveTask, CommandRequest, StudentVerification};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Identity and eligibility checks keyed by tracker login.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Checks whether `login` belongs to a registered, reviewed student.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend cannot be reached or answers
    /// with an unexpected payload.
    async fn verify_identity(&self, login: &str) -> BackendResult<StudentVerification>;

    /// Returns the task `login` currently holds, if any.
    ///
    /// Any non-null record counts as a held task, whatever its shape.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend cannot be reached or answers
    /// with an unexpected payload.
    async fn active_task(&self, login: &str) -> BackendResult<Option<ActiveTask>>;
}

/// Backend task state transitions.
///
/// Each call answers whether the backend accepted the transition. The
/// backend alone enforces consistency between concurrent commands.
#[async_trait]
pub trait TaskTransitions: Send + Sync {
    /// Claims the task for the requesting student.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or decoding failures.
    async fn request_assign(&self, request: &CommandRequest) -> BackendResult<bool>;

    /// Asks for the task to be marked complete.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or decoding failures.
    async fn request_complete(&self, request: &CommandRequest) -> BackendResult<bool>;

    /// Releases the task back to open.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or decoding failures.
    async fn release(&self, request: &CommandRequest) -> BackendResult<bool>;
}

/// Errors returned by backend adapters.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The request could not be sent or the response could not be read.
    #[error("backend {endpoint} request failed: {source}")]
    Transport {
        /// Endpoint path that was called.
        endpoint: String,
        /// Underlying failure.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The backend answered with a non-success status.
    #[error("backend {endpoint} failed with status {status}: {body}")]
    Status {
        /// Endpoint path that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode backend {endpoint} response: {reason}")]
    Decode {
        /// Endpoint path that was called.
        endpoint: String,
        /// Decoding failure reason.
        reason: String,
    },
}

impl BackendError {
    /// Wraps a transport failure.
    pub fn transport(
        endpoint: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: Arc::new(err),
        }
    }
}
