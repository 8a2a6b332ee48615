//! Inbound command payload derived from an issue-comment event.

use super::{StudentDomainError, TaskSnapshot};
use serde::{Deserialize, Serialize};

/// Tracker user issuing a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ActorRecord")]
pub struct Actor {
    login: String,
}

impl Actor {
    /// Creates an actor from a tracker login.
    ///
    /// # Errors
    ///
    /// Returns [`StudentDomainError::EmptyLogin`] if the login is blank.
    pub fn new(login: impl Into<String>) -> Result<Self, StudentDomainError> {
        let raw = login.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(StudentDomainError::EmptyLogin);
        }
        Ok(Self {
            login: normalized.to_owned(),
        })
    }

    /// Returns the tracker login.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }
}

/// Wire shape of a tracker user; every field except `login` is ignored.
#[derive(Deserialize)]
struct ActorRecord {
    login: String,
}

impl TryFrom<ActorRecord> for Actor {
    type Error = StudentDomainError;

    fn try_from(record: ActorRecord) -> Result<Self, Self::Error> {
        Self::new(record.login)
    }
}

/// A label attached to a tracker issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueLabel {
    /// Label name.
    pub name: String,
}

/// Tracker issue state captured with the webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerIssue {
    /// Labels currently on the issue.
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
}

impl TrackerIssue {
    /// Creates an issue view carrying the given label names.
    #[must_use]
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|name| IssueLabel { name: name.into() })
                .collect(),
        }
    }

    /// Returns `true` when the issue carries a label named `name`.
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// Structured command payload handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// The commenter.
    #[serde(alias = "user")]
    pub actor: Actor,
    /// Raw comment text holding the command.
    pub command: String,
    /// Backend task snapshot for the commented issue.
    pub task: TaskSnapshot,
    /// Tracker issue state at delivery time.
    #[serde(default)]
    pub issue: TrackerIssue,
}
