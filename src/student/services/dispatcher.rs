//! Student command dispatcher.

use std::sync::Arc;

use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};

use super::{DispatchPolicy, ReleaseOrder, TrackerCleanup};
use crate::student::{
    domain::{
        Actor, CommandPayload, CommandRequest, CommandResult, CommentTemplates, MessageKey,
        StateVerdict, StudentCommand, TaskSnapshot, TemplateContext, TemplateError,
        TrackerIssue, evaluate,
    },
    ports::{BackendError, IssueTracker, StudentDirectory, TaskTransitions, TrackerError},
};

/// Faults raised while handling a command.
///
/// Policy rejections are not errors: they come back as a
/// [`CommandResult`] with `result == false`.
#[derive(Debug, Error)]
pub enum StudentCommandError {
    /// A backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// A tracker call failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    /// A reply template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for command dispatch.
pub type StudentCommandResult<T> = Result<T, StudentCommandError>;

/// Validates student commands and drives the matching backend transition.
#[derive(Clone)]
pub struct StudentCommandService<D, T, I>
where
    D: StudentDirectory,
    T: TaskTransitions,
    I: IssueTracker,
{
    directory: Arc<D>,
    transitions: Arc<T>,
    cleanup: TrackerCleanup<I>,
    templates: Arc<CommentTemplates>,
    policy: DispatchPolicy,
}

impl<D, T, I> StudentCommandService<D, T, I>
where
    D: StudentDirectory,
    T: TaskTransitions,
    I: IssueTracker,
{
    /// Creates a dispatcher with the default policy.
    #[must_use]
    pub fn new(
        directory: Arc<D>,
        transitions: Arc<T>,
        tracker: Arc<I>,
        templates: Arc<CommentTemplates>,
    ) -> Self {
        let policy = DispatchPolicy::default();
        Self {
            directory,
            transitions,
            cleanup: TrackerCleanup::new(tracker, policy.claimed_label.clone()),
            templates,
            policy,
        }
    }

    /// Replaces the dispatch policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.cleanup = self.cleanup.with_claimed_label(policy.claimed_label.clone());
        self.policy = policy;
        self
    }

    /// Returns the active dispatch policy.
    #[must_use]
    pub const fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Handles a full command payload.
    ///
    /// # Errors
    ///
    /// See [`Self::dispatch`].
    pub async fn handle(&self, payload: &CommandPayload) -> StudentCommandResult<CommandResult> {
        self.dispatch(&payload.actor, &payload.command, &payload.task, &payload.issue)
            .await
    }

    /// Validates `command_text` from `actor` against `task` and performs the
    /// transition when every guard passes.
    ///
    /// Guards run in a fixed order and the first failing one decides the
    /// reply. No backend or tracker mutation happens before all guards of the
    /// command have passed.
    ///
    /// # Errors
    ///
    /// Returns [`StudentCommandError`] when a backend or tracker call fails
    /// or a reply template cannot be rendered.
    pub async fn dispatch(
        &self,
        actor: &Actor,
        command_text: &str,
        task: &TaskSnapshot,
        issue: &TrackerIssue,
    ) -> StudentCommandResult<CommandResult> {
        let Some(command) = StudentCommand::parse(command_text) else {
            debug!(actor = actor.login(), "unsupported student command");
            return self.reply(None, MessageKey::UnsupportedCommand, false);
        };

        let span = info_span!(
            "student.command",
            command = command.as_str(),
            actor = actor.login(),
            issue_id = %task.github_issue_id,
        );
        self.dispatch_command(command, actor, task, issue)
            .instrument(span)
            .await
    }

    async fn dispatch_command(
        &self,
        command: StudentCommand,
        actor: &Actor,
        task: &TaskSnapshot,
        issue: &TrackerIssue,
    ) -> StudentCommandResult<CommandResult> {
        let expected_next = match evaluate(command, task.task_status) {
            StateVerdict::Proceed { expected_next } => expected_next,
            StateVerdict::Reject(key) => {
                debug!(status = %task.task_status, %key, "state gate rejected command");
                return self.reply(Some(command), key, false);
            }
        };

        if command.requires_assigned_student() && !task.is_bound_to(actor.login()) {
            debug!(
                assigned = task.student_github_login.as_deref().unwrap_or_default(),
                "actor is not the assigned student"
            );
            return self.reply(Some(command), MessageKey::NoPermission, false);
        }

        let request = CommandRequest::new(task.github_issue_id, actor.login());
        let outcome = match command {
            StudentCommand::RequestAssign => self.request_assign(actor, task, &request).await?,
            StudentCommand::RequestComplete => {
                let accepted = self.transitions.request_complete(&request).await?;
                self.transition_outcome(command, accepted, MessageKey::CompleteSuccess)
            }
            StudentCommand::RequestRelease => {
                let accepted = self.release(task, issue, &request).await?;
                self.transition_outcome(command, accepted, MessageKey::ReleaseSuccess)
            }
        };

        match outcome {
            Ok(key) => {
                info!(next = %expected_next, "transition accepted");
                self.reply(Some(command), key, true)
            }
            Err(key) => self.reply(Some(command), key, false),
        }
    }

    async fn request_assign(
        &self,
        actor: &Actor,
        task: &TaskSnapshot,
        request: &CommandRequest,
    ) -> StudentCommandResult<Result<MessageKey, MessageKey>> {
        let verification = self.directory.verify_identity(actor.login()).await?;
        if !verification.success {
            debug!("student identity not verified");
            return Ok(Err(MessageKey::WaitingInfoReview));
        }

        if self.policy.require_contract && !verification.has_contract() {
            debug!("student contract missing");
            return Ok(Err(MessageKey::WaitingContract));
        }

        if task.is_bound_to(actor.login()) {
            debug!("task already claimed by actor");
            return Ok(Err(MessageKey::AlreadyClaimed));
        }

        if let Some(active) = self.directory.active_task(actor.login()).await? {
            debug!(active_issue_id = ?active.issue_id(), "student holds another task");
            return Ok(Err(MessageKey::ExistingTask));
        }

        let accepted = self.transitions.request_assign(request).await?;
        Ok(self.transition_outcome(
            StudentCommand::RequestAssign,
            accepted,
            MessageKey::AssignSuccess,
        ))
    }

    async fn release(
        &self,
        task: &TaskSnapshot,
        issue: &TrackerIssue,
        request: &CommandRequest,
    ) -> StudentCommandResult<bool> {
        match self.policy.release_order {
            ReleaseOrder::TrackerFirst => {
                let report = self.cleanup.apply(task, issue).await?;
                debug!(label_removed = report.label_removed, "tracker cleaned up before release");
                Ok(self.transitions.release(request).await?)
            }
            ReleaseOrder::BackendFirst => {
                let accepted = self.transitions.release(request).await?;
                if accepted {
                    let report = self.cleanup.apply(task, issue).await?;
                    debug!(label_removed = report.label_removed, "tracker cleaned up after release");
                }
                Ok(accepted)
            }
        }
    }

    fn transition_outcome(
        &self,
        command: StudentCommand,
        accepted: bool,
        success: MessageKey,
    ) -> Result<MessageKey, MessageKey> {
        if accepted || !self.policy.transition_check.checks(command) {
            return Ok(success);
        }
        warn!(command = command.as_str(), "backend rejected transition");
        Err(MessageKey::ApiError)
    }

    fn reply(
        &self,
        command: Option<StudentCommand>,
        key: MessageKey,
        result: bool,
    ) -> StudentCommandResult<CommandResult> {
        let context = TemplateContext {
            command: command.map_or("", StudentCommand::as_str),
            claimed_label: &self.policy.claimed_label,
        };
        let message = self.templates.render(key, &context)?;
        Ok(CommandResult { result, message })
    }
}
