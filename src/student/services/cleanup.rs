//! Tracker side effects of a release.

use crate::student::{
    domain::{TaskSnapshot, TrackerIssue},
    ports::{IssueTracker, TrackerResult},
};
use std::sync::Arc;
use tracing::debug;

/// What a cleanup pass changed on the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Whether the claimed label was removed.
    pub label_removed: bool,
    /// Login removed from the assignees, if any.
    pub unassigned: Option<String>,
}

/// Mirrors a release onto the tracker issue.
#[derive(Clone)]
pub struct TrackerCleanup<I>
where
    I: IssueTracker,
{
    tracker: Arc<I>,
    claimed_label: String,
}

impl<I> TrackerCleanup<I>
where
    I: IssueTracker,
{
    /// Creates a cleanup pass that removes `claimed_label`.
    #[must_use]
    pub fn new(tracker: Arc<I>, claimed_label: impl Into<String>) -> Self {
        Self {
            tracker,
            claimed_label: claimed_label.into(),
        }
    }

    /// Replaces the label removed on release.
    #[must_use]
    pub fn with_claimed_label(mut self, claimed_label: impl Into<String>) -> Self {
        self.claimed_label = claimed_label.into();
        self
    }

    /// Removes the claimed label and the task's student from the issue.
    ///
    /// A missing label is not an error: the label is only removed when the
    /// delivered issue carries it, and the tracker may still report it gone.
    ///
    /// # Errors
    ///
    /// Returns the first [`TrackerError`](crate::student::ports::TrackerError)
    /// raised by the tracker.
    pub async fn apply(
        &self,
        task: &TaskSnapshot,
        issue: &TrackerIssue,
    ) -> TrackerResult<CleanupReport> {
        let locator = task.locator();
        let mut report = CleanupReport::default();

        if issue.has_label(&self.claimed_label) {
            report.label_removed = self
                .tracker
                .remove_label(&locator, &self.claimed_label)
                .await?;
            debug!(issue = %locator, removed = report.label_removed, "claimed label cleanup");
        }

        if let Some(login) = task
            .student_github_login
            .as_deref()
            .filter(|login| !login.is_empty())
        {
            self.tracker.remove_assignee(&locator, login).await?;
            debug!(issue = %locator, login, "assignee removed");
            report.unassigned = Some(login.to_owned());
        }

        Ok(report)
    }
}
