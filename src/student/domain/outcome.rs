//! Command outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalogue key of every reply the dispatcher can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// The task state does not allow the command.
    InvalidTaskState,
    /// The actor is not the student assigned to the task.
    NoPermission,
    /// The comment does not hold a supported student command.
    UnsupportedCommand,
    /// Another student's claim is pending review.
    ClaimedByOther,
    /// The actor's student identity has not been confirmed yet.
    WaitingInfoReview,
    /// The actor has not signed a contract yet.
    WaitingContract,
    /// The actor already claimed this task.
    AlreadyClaimed,
    /// The actor already holds another active task.
    ExistingTask,
    /// The claim was accepted.
    AssignSuccess,
    /// The completion request was accepted.
    CompleteSuccess,
    /// The release was accepted.
    ReleaseSuccess,
    /// The backend rejected a transition that passed every guard.
    ApiError,
}

impl MessageKey {
    /// Every catalogue key.
    pub const ALL: [Self; 12] = [
        Self::InvalidTaskState,
        Self::NoPermission,
        Self::UnsupportedCommand,
        Self::ClaimedByOther,
        Self::WaitingInfoReview,
        Self::WaitingContract,
        Self::AlreadyClaimed,
        Self::ExistingTask,
        Self::AssignSuccess,
        Self::CompleteSuccess,
        Self::ReleaseSuccess,
        Self::ApiError,
    ];

    /// Returns the key in catalogue notation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidTaskState => "command.invalidTaskState",
            Self::NoPermission => "command.noPermission",
            Self::UnsupportedCommand => "command.unsupportStuCommand",
            Self::ClaimedByOther => "requestAssign.claimByOther",
            Self::WaitingInfoReview => "requestAssign.waitingInfoReview",
            Self::WaitingContract => "requestAssign.waitingContract",
            Self::AlreadyClaimed => "requestAssign.alreadyClaim",
            Self::ExistingTask => "requestAssign.existTask",
            Self::AssignSuccess => "requestAssign.success",
            Self::CompleteSuccess => "requestComplete.success",
            Self::ReleaseSuccess => "requestRelease.success",
            Self::ApiError => "apiError",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The dispatcher's reply, posted verbatim as one issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// `true` when the underlying state-changing call succeeded.
    pub result: bool,
    /// Rendered comment text.
    pub message: String,
}

impl CommandResult {
    /// A successful outcome.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            result: true,
            message: message.into(),
        }
    }

    /// A rejected or failed outcome.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            result: false,
            message: message.into(),
        }
    }
}
