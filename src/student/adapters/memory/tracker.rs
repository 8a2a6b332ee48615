//! In-memory issue tracker that records every call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::student::{
    domain::IssueLocator,
    ports::{IssueTracker, TrackerError, TrackerResult},
};

/// A call received by [`InMemoryIssueTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    /// Label removal.
    RemoveLabel {
        /// Target issue.
        issue: IssueLocator,
        /// Label name.
        label: String,
    },
    /// Assignee removal.
    RemoveAssignee {
        /// Target issue.
        issue: IssueLocator,
        /// Removed login.
        login: String,
    },
    /// New comment.
    CreateComment {
        /// Target issue.
        issue: IssueLocator,
        /// Comment text.
        body: String,
    },
}

#[derive(Debug, Clone, Default)]
struct IssueRecord {
    labels: Vec<String>,
    assignees: Vec<String>,
    comments: Vec<String>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    issues: HashMap<IssueLocator, IssueRecord>,
    calls: Vec<TrackerCall>,
}

/// Thread-safe in-memory issue tracker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueTracker {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

impl InMemoryIssueTracker {
    /// Creates a tracker with no issues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an issue with labels and assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the state lock is poisoned.
    pub fn insert_issue<L, A>(
        &self,
        issue: IssueLocator,
        labels: L,
        assignees: A,
    ) -> TrackerResult<()>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let record = IssueRecord {
            labels: labels.into_iter().map(Into::into).collect(),
            assignees: assignees.into_iter().map(Into::into).collect(),
            comments: Vec::new(),
        };
        self.write()?.issues.insert(issue, record);
        Ok(())
    }

    /// Returns the labels currently on an issue.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the state lock is poisoned.
    pub fn labels(&self, issue: &IssueLocator) -> TrackerResult<Vec<String>> {
        self.record(issue, |record| record.labels.clone())
    }

    /// Returns the current assignees of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the state lock is poisoned.
    pub fn assignees(&self, issue: &IssueLocator) -> TrackerResult<Vec<String>> {
        self.record(issue, |record| record.assignees.clone())
    }

    /// Returns the comments posted on an issue, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the state lock is poisoned.
    pub fn comments(&self, issue: &IssueLocator) -> TrackerResult<Vec<String>> {
        self.record(issue, |record| record.comments.clone())
    }

    /// Returns every call received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the state lock is poisoned.
    pub fn calls(&self) -> TrackerResult<Vec<TrackerCall>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.calls.clone())
    }

    fn record<T>(
        &self,
        issue: &IssueLocator,
        view: impl FnOnce(&IssueRecord) -> T,
    ) -> TrackerResult<T> {
        let state = self.state.read().map_err(poisoned)?;
        let empty = IssueRecord::default();
        Ok(view(state.issues.get(issue).unwrap_or(&empty)))
    }

    fn write(&self) -> TrackerResult<RwLockWriteGuard<'_, InMemoryTrackerState>> {
        self.state.write().map_err(poisoned)
    }
}

fn poisoned(err: impl std::fmt::Display) -> TrackerError {
    TrackerError::transport("memory", std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn remove_label(&self, issue: &IssueLocator, label: &str) -> TrackerResult<bool> {
        let mut state = self.write()?;
        state.calls.push(TrackerCall::RemoveLabel {
            issue: issue.clone(),
            label: label.to_owned(),
        });
        let record = state.issues.entry(issue.clone()).or_default();
        let before = record.labels.len();
        record.labels.retain(|existing| existing != label);
        Ok(record.labels.len() != before)
    }

    async fn remove_assignee(&self, issue: &IssueLocator, login: &str) -> TrackerResult<()> {
        let mut state = self.write()?;
        state.calls.push(TrackerCall::RemoveAssignee {
            issue: issue.clone(),
            login: login.to_owned(),
        });
        state
            .issues
            .entry(issue.clone())
            .or_default()
            .assignees
            .retain(|existing| existing != login);
        Ok(())
    }

    async fn create_comment(&self, issue: &IssueLocator, body: &str) -> TrackerResult<()> {
        let mut state = self.write()?;
        state.calls.push(TrackerCall::CreateComment {
            issue: issue.clone(),
            body: body.to_owned(),
        });
        state
            .issues
            .entry(issue.clone())
            .or_default()
            .comments
            .push(body.to_owned());
        Ok(())
    }
}
