//! reqwest client for the GitHub issues REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Method, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::{Value, json};
use tracing::debug;

use super::truncate_body;
use crate::student::{
    domain::IssueLocator,
    ports::{IssueTracker, TrackerError, TrackerResult},
};

/// GitHub issue tracker reached over its REST API.
#[derive(Debug, Clone)]
pub struct GithubIssueTracker {
    http: reqwest::Client,
    api_base: Url,
}

impl GithubIssueTracker {
    /// Creates a tracker client authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidBaseUrl`] when `api_base` is not an
    /// absolute URL, or [`TrackerError::Transport`] when the token is not a
    /// valid header value or the client cannot be built.
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> TrackerResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("taskboard-student-bot"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        let auth_value = HeaderValue::from_str(&auth_header)
            .map_err(|err| TrackerError::transport("configure client", err))?;
        headers.insert(AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| TrackerError::transport("configure client", err))?;
        Self::with_client(http, api_base)
    }

    /// Creates a tracker adapter around an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidBaseUrl`] when `api_base` is not an
    /// absolute URL.
    pub fn with_client(http: reqwest::Client, api_base: &str) -> TrackerResult<Self> {
        let api_base = Url::parse(api_base.trim())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| TrackerError::InvalidBaseUrl(api_base.to_owned()))?;
        Ok(Self { http, api_base })
    }

    /// Builds `{api_base}/repos/{owner}/{repo}/issues/{number}/{tail...}`
    /// with every segment percent-encoded.
    fn issue_url(&self, issue: &IssueLocator, tail: &[&str]) -> TrackerResult<Url> {
        let number = issue.issue_number.to_string();
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| TrackerError::InvalidBaseUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend([
                "repos",
                issue.owner.as_str(),
                issue.repo.as_str(),
                "issues",
                number.as_str(),
            ])
            .extend(tail);
        Ok(url)
    }

    async fn send(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> TrackerResult<Response> {
        debug!(%url, %method, operation, "tracker request");
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request
            .send()
            .await
            .map_err(|err| TrackerError::transport(operation, err))
    }

    async fn require_success(operation: &'static str, response: Response) -> TrackerResult<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::status_error(operation, response).await)
    }

    async fn status_error(operation: &'static str, response: Response) -> TrackerError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        TrackerError::Status {
            operation,
            status,
            body: truncate_body(&body),
        }
    }
}

/// GitHub's message for deleting a label the issue does not carry.
const LABEL_ABSENT_MESSAGE: &str = "Label does not exist";

#[async_trait]
impl IssueTracker for GithubIssueTracker {
    async fn remove_label(&self, issue: &IssueLocator, label: &str) -> TrackerResult<bool> {
        let url = self.issue_url(issue, &["labels", label])?;
        let response = self.send("remove label", Method::DELETE, url, None).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status != StatusCode::NOT_FOUND {
            return Err(Self::status_error("remove label", response).await);
        }
        // Any other 404 means the issue itself is out of reach.
        let body = response.text().await.unwrap_or_default();
        if body.contains(LABEL_ABSENT_MESSAGE) {
            return Ok(false);
        }
        Err(TrackerError::Status {
            operation: "remove label",
            status: status.as_u16(),
            body: truncate_body(&body),
        })
    }

    async fn remove_assignee(&self, issue: &IssueLocator, login: &str) -> TrackerResult<()> {
        let url = self.issue_url(issue, &["assignees"])?;
        let body = json!({ "assignees": [login] });
        let response = self
            .send("remove assignee", Method::DELETE, url, Some(body))
            .await?;
        Self::require_success("remove assignee", response).await
    }

    async fn create_comment(&self, issue: &IssueLocator, body: &str) -> TrackerResult<()> {
        let url = self.issue_url(issue, &["comments"])?;
        let payload = json!({ "body": body });
        let response = self
            .send("create comment", Method::POST, url, Some(payload))
            .await?;
        Self::require_success("create comment", response).await
    }
}
