//! Domain model for student task commands.
//!
//! Everything here is a plain value: task snapshots as delivered with the
//! webhook, the parsed command, backend request envelopes, the command state
//! machine, and the comment template catalogue. No I/O happens inside the
//! domain boundary.

mod command;
mod error;
mod ids;
mod machine;
mod outcome;
mod payload;
mod request;
mod task;
mod templates;

pub use command::StudentCommand;
pub use error::{ParseTaskStatusError, StudentDomainError, TemplateError};
pub use ids::{GithubIssueId, IssueNumber};
pub use machine::{COMMAND_RULES, CommandRule, StateVerdict, command_rule, evaluate};
pub use outcome::{CommandResult, MessageKey};
pub use payload::{Actor, CommandPayload, IssueLabel, TrackerIssue};
pub use request::{ActiveTask, CommandRequest, StudentVerification};
pub use task::{IssueLocator, TaskSnapshot, TaskStatus};
pub use templates::{
    AssignTemplates, CommandTemplates, CommentTemplates, DEFAULT_CLAIMED_LABEL,
    SuccessTemplate, TemplateContext,
};
