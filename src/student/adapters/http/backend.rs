//! reqwest client for the task backend API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;

use super::truncate_body;
use crate::student::{
    domain::{ActiveTask, CommandRequest, StudentVerification},
    ports::{BackendError, BackendResult, StudentDirectory, TaskTransitions},
};

const VALIDATE_STUDENT: &str = "/student/validate";
const STUDENT_TASK: &str = "/student/task";
const REQUEST_ASSIGN: &str = "/task/request-assign";
const REQUEST_COMPLETE: &str = "/task/request-complete";
const RELEASE: &str = "/task/release";

/// Task backend reached over HTTP.
///
/// Every call is a JSON `POST` to `{endpoint}{path}`.
#[derive(Debug, Clone)]
pub struct HttpTaskBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTaskBackend {
    /// Creates a client for the backend rooted at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(endpoint: &str, timeout: Duration) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BackendError::transport(endpoint, err))?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Creates a backend adapter around an existing client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
        }
    }

    async fn post_json<B, T>(&self, path: &'static str, body: &B) -> BackendResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.endpoint);
        debug!(%url, "backend request");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| BackendError::transport(path, err))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| BackendError::transport(path, err))?;
        if !status.is_success() {
            return Err(BackendError::Status {
                endpoint: path.to_owned(),
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        // An empty body means "no value", the same as a JSON null.
        let payload = if text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        serde_json::from_str(payload).map_err(|err| BackendError::Decode {
            endpoint: path.to_owned(),
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl StudentDirectory for HttpTaskBackend {
    async fn verify_identity(&self, login: &str) -> BackendResult<StudentVerification> {
        self.post_json(VALIDATE_STUDENT, &json!({ "login": login }))
            .await
    }

    async fn active_task(&self, login: &str) -> BackendResult<Option<ActiveTask>> {
        self.post_json(STUDENT_TASK, &json!({ "login": login })).await
    }
}

#[async_trait]
impl TaskTransitions for HttpTaskBackend {
    async fn request_assign(&self, request: &CommandRequest) -> BackendResult<bool> {
        self.post_json(REQUEST_ASSIGN, request).await
    }

    async fn request_complete(&self, request: &CommandRequest) -> BackendResult<bool> {
        self.post_json(REQUEST_COMPLETE, request).await
    }

    async fn release(&self, request: &CommandRequest) -> BackendResult<bool> {
        self.post_json(RELEASE, request).await
    }
}
