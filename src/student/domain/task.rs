//! Task snapshot types delivered alongside each command.

use super::{GithubIssueId, IssueNumber, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Assignment status of a task as reported by the backend.
///
/// Serialises as the PascalCase name. Decoding accepts any casing and
/// ignores `_` and `-`, so `request_assign` reads as [`Self::RequestAssign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    /// Task is open for claiming.
    Open,
    /// A student has claimed the task and a mentor has not yet confirmed.
    RequestAssign,
    /// Task is assigned to a student.
    Assigned,
    /// The assigned student asked for the task to be marked complete.
    RequestComplete,
    /// Task has been completed.
    Completed,
    /// Task has been closed without completion.
    Closed,
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::RequestAssign => "RequestAssign",
            Self::Assigned => "Assigned",
            Self::RequestComplete => "RequestComplete",
            Self::Completed => "Completed",
            Self::Closed => "Closed",
        }
    }

    /// Returns `true` when no student command can move the task further.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Closed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().replace(['_', '-'], "").to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "requestassign" => Ok(Self::RequestAssign),
            "assigned" => Ok(Self::Assigned),
            "requestcomplete" => Ok(Self::RequestComplete),
            "completed" => Ok(Self::Completed),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a backend task record.
///
/// The snapshot is fetched once per webhook delivery and never re-read or
/// mutated while a command is handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Stable tracker issue identifier.
    pub github_issue_id: GithubIssueId,
    /// Repository-local issue number.
    pub github_issue_number: IssueNumber,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Current assignment status.
    pub task_status: TaskStatus,
    /// Login of the student currently associated with the task, if any.
    #[serde(default)]
    pub student_github_login: Option<String>,
}

impl TaskSnapshot {
    /// Returns the tracker coordinates of the task's issue.
    #[must_use]
    pub fn locator(&self) -> IssueLocator {
        IssueLocator {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            issue_number: self.github_issue_number,
        }
    }

    /// Returns `true` when `login` is the student bound to this task.
    #[must_use]
    pub fn is_bound_to(&self, login: &str) -> bool {
        self.student_github_login.as_deref() == Some(login)
    }
}

/// Tracker coordinates of one issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueLocator {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Repository-local issue number.
    pub issue_number: IssueNumber,
}

impl fmt::Display for IssueLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.issue_number)
    }
}
