//! Request and response envelopes exchanged with the task backend.

use super::{GithubIssueId, TaskSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Identifies "this task, this student" for a backend transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Task issue identifier.
    pub github_issue_id: GithubIssueId,
    /// Login of the student issuing the command.
    pub student_login: String,
}

impl CommandRequest {
    /// Creates a request envelope.
    #[must_use]
    pub fn new(github_issue_id: GithubIssueId, student_login: impl Into<String>) -> Self {
        Self {
            github_issue_id,
            student_login: student_login.into(),
        }
    }
}

/// Outcome of a student identity check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentVerification {
    /// Whether the login belongs to a registered, reviewed student.
    pub success: bool,
    /// Registered student name.
    #[serde(default)]
    pub student_name: Option<String>,
    /// Contract deadline, present once the student has signed.
    #[serde(default)]
    pub contract_deadline: Option<String>,
}

impl StudentVerification {
    /// A verified student without contract information.
    #[must_use]
    pub const fn verified() -> Self {
        Self {
            success: true,
            student_name: None,
            contract_deadline: None,
        }
    }

    /// A failed verification.
    #[must_use]
    pub const fn rejected() -> Self {
        Self {
            success: false,
            student_name: None,
            contract_deadline: None,
        }
    }

    /// Sets the contract deadline.
    #[must_use]
    pub fn with_contract_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.contract_deadline = Some(deadline.into());
        self
    }

    /// Returns `true` when a signed contract is on record.
    #[must_use]
    pub fn has_contract(&self) -> bool {
        self.contract_deadline
            .as_deref()
            .is_some_and(|deadline| !deadline.trim().is_empty())
    }
}

/// A task the backend reports as currently held by a student.
///
/// Only presence matters to the claim guard, so the record is kept as raw
/// JSON: task shapes this crate does not model still count as a held task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveTask(Value);

impl ActiveTask {
    /// Wraps a raw backend task record.
    #[must_use]
    pub const fn new(record: Value) -> Self {
        Self(record)
    }

    /// Returns the held task's issue identifier when the record carries one.
    #[must_use]
    pub fn issue_id(&self) -> Option<u64> {
        self.0.get("github_issue_id").and_then(Value::as_u64)
    }

    /// Returns the raw record.
    #[must_use]
    pub const fn record(&self) -> &Value {
        &self.0
    }
}

impl From<&TaskSnapshot> for ActiveTask {
    fn from(task: &TaskSnapshot) -> Self {
        Self(json!({
            "github_issue_id": task.github_issue_id.value(),
            "github_issue_number": task.github_issue_number.value(),
            "owner": task.owner,
            "repo": task.repo,
            "task_status": task.task_status.as_str(),
            "student_github_login": task.student_github_login,
        }))
    }
}
