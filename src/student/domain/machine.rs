//! State-gating table for student commands.
//!
//! Guards that depend only on the task status are data: each
//! [`CommandRule`] row names a `(command, status)` pair and its verdict. A
//! pair without a row is rejected as an invalid task state.

use super::{MessageKey, StudentCommand, TaskStatus};

/// Verdict of the state gate for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateVerdict {
    /// The command may proceed to its remaining guards.
    Proceed {
        /// Status the backend is expected to move the task to.
        expected_next: TaskStatus,
    },
    /// The command is rejected with the given reply.
    Reject(MessageKey),
}

/// One row of the command state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRule {
    /// Command the row applies to.
    pub command: StudentCommand,
    /// Task status the row applies to.
    pub status: TaskStatus,
    /// Verdict for the pair.
    pub verdict: StateVerdict,
}

/// Every explicit `(command, status)` verdict.
pub static COMMAND_RULES: [CommandRule; 4] = [
    CommandRule {
        command: StudentCommand::RequestAssign,
        status: TaskStatus::Open,
        verdict: StateVerdict::Proceed {
            expected_next: TaskStatus::RequestAssign,
        },
    },
    // A pending claim gets its own reply so students can tell it from an
    // assigned task.
    CommandRule {
        command: StudentCommand::RequestAssign,
        status: TaskStatus::RequestAssign,
        verdict: StateVerdict::Reject(MessageKey::ClaimedByOther),
    },
    CommandRule {
        command: StudentCommand::RequestComplete,
        status: TaskStatus::Assigned,
        verdict: StateVerdict::Proceed {
            expected_next: TaskStatus::RequestComplete,
        },
    },
    CommandRule {
        command: StudentCommand::RequestRelease,
        status: TaskStatus::Assigned,
        verdict: StateVerdict::Proceed {
            expected_next: TaskStatus::Open,
        },
    },
];

/// Finds the explicit rule for a `(command, status)` pair.
#[must_use]
pub fn command_rule(command: StudentCommand, status: TaskStatus) -> Option<&'static CommandRule> {
    COMMAND_RULES
        .iter()
        .find(|rule| rule.command == command && rule.status == status)
}

/// Evaluates the state gate for `command` against `status`.
#[must_use]
pub fn evaluate(command: StudentCommand, status: TaskStatus) -> StateVerdict {
    command_rule(command, status).map_or(
        StateVerdict::Reject(MessageKey::InvalidTaskState),
        |rule| rule.verdict,
    )
}
