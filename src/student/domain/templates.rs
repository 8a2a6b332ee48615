//! Comment template catalogue.
//!
//! Every reply the bot posts is a configured template. Templates are
//! minijinja sources rendered against a [`TemplateContext`] that only holds
//! trusted values; comment text and logins never reach the renderer.

use super::{MessageKey, TemplateError};
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tracker label marking a claimed task.
pub const DEFAULT_CLAIMED_LABEL: &str = "已认领";

/// Values available to templates while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateContext<'a> {
    /// Canonical command spelling, empty for unsupported input.
    pub command: &'a str,
    /// Label that marks a claimed task on the tracker.
    pub claimed_label: &'a str,
}

/// Replies shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandTemplates {
    /// The task state does not allow the command.
    pub invalid_task_state: String,
    /// The actor is not the assigned student.
    pub no_permission: String,
    /// The comment is not a supported student command.
    #[serde(rename = "unsupportStuCommand", alias = "unsupportedCommand")]
    pub unsupported_command: String,
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            invalid_task_state: "`{{ command }}` is not available in the task's current state."
                .to_owned(),
            no_permission: "Only the student assigned to this task can use `{{ command }}`."
                .to_owned(),
            unsupported_command: "Unsupported command. Students can use `/request-assign`, \
                                  `/request-complete`, or `/request-release`."
                .to_owned(),
        }
    }
}

/// Replies specific to `/request-assign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignTemplates {
    /// Another student's claim is pending review.
    pub claim_by_other: String,
    /// The student's registration has not been reviewed.
    pub waiting_info_review: String,
    /// The student has not signed a contract.
    pub waiting_contract: String,
    /// The student already claimed this task.
    pub already_claim: String,
    /// The student holds another active task.
    pub exist_task: String,
    /// The claim was accepted.
    pub success: String,
}

impl Default for AssignTemplates {
    fn default() -> Self {
        Self {
            claim_by_other: "This task has already been claimed by another student and is \
                             pending review."
                .to_owned(),
            waiting_info_review: "Your student information is still under review. You can \
                                  claim tasks once it has been approved."
                .to_owned(),
            waiting_contract: "Please sign the student contract before claiming a task."
                .to_owned(),
            already_claim: "You have already claimed this task.".to_owned(),
            exist_task: "You already have an active task. Finish or release it before \
                         claiming another one."
                .to_owned(),
            success: "Claim received. A mentor will review your request shortly.".to_owned(),
        }
    }
}

/// A command with a single success reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessTemplate {
    /// The request was accepted.
    pub success: String,
}

impl SuccessTemplate {
    fn new(success: &str) -> Self {
        Self {
            success: success.to_owned(),
        }
    }
}

impl Default for SuccessTemplate {
    fn default() -> Self {
        Self::new("Request received.")
    }
}

/// The full reply catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentTemplates {
    /// Replies shared by every command.
    pub command: CommandTemplates,
    /// Replies for `/request-assign`.
    pub request_assign: AssignTemplates,
    /// Replies for `/request-complete`.
    pub request_complete: SuccessTemplate,
    /// Replies for `/request-release`.
    pub request_release: SuccessTemplate,
    /// Reply when the backend rejects a transition.
    pub api_error: String,
}

impl Default for CommentTemplates {
    fn default() -> Self {
        Self {
            command: CommandTemplates::default(),
            request_assign: AssignTemplates::default(),
            request_complete: SuccessTemplate::new(
                "Completion requested. A mentor will review your work.",
            ),
            request_release: SuccessTemplate::new(
                "The task has been released and the `{{ claimed_label }}` label removed.",
            ),
            api_error: "API ERROR".to_owned(),
        }
    }
}

impl CommentTemplates {
    /// Parses and validates a JSON catalogue. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] for malformed JSON and
    /// [`TemplateError::Invalid`] when a template does not compile.
    pub fn from_json_str(raw: &str) -> Result<Self, TemplateError> {
        let templates: Self = serde_json::from_str(raw)?;
        templates.validate()?;
        Ok(templates)
    }

    /// Reads and validates a JSON catalogue from disk.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] when the file cannot be read, or any
    /// error from [`Self::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Returns the template source for `key`.
    #[must_use]
    pub fn template(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::InvalidTaskState => &self.command.invalid_task_state,
            MessageKey::NoPermission => &self.command.no_permission,
            MessageKey::UnsupportedCommand => &self.command.unsupported_command,
            MessageKey::ClaimedByOther => &self.request_assign.claim_by_other,
            MessageKey::WaitingInfoReview => &self.request_assign.waiting_info_review,
            MessageKey::WaitingContract => &self.request_assign.waiting_contract,
            MessageKey::AlreadyClaimed => &self.request_assign.already_claim,
            MessageKey::ExistingTask => &self.request_assign.exist_task,
            MessageKey::AssignSuccess => &self.request_assign.success,
            MessageKey::CompleteSuccess => &self.request_complete.success,
            MessageKey::ReleaseSuccess => &self.request_release.success,
            MessageKey::ApiError => &self.api_error,
        }
    }

    /// Compiles every template once.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Invalid`] for the first template that fails
    /// to compile.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let environment = Environment::new();
        for key in MessageKey::ALL {
            environment
                .template_from_str(self.template(key))
                .map_err(|error| TemplateError::Invalid {
                    key: key.as_str(),
                    reason: error.to_string(),
                })?;
        }
        Ok(())
    }

    /// Renders the reply for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Invalid`] when rendering fails.
    pub fn render(
        &self,
        key: MessageKey,
        context: &TemplateContext<'_>,
    ) -> Result<String, TemplateError> {
        Environment::new()
            .render_str(self.template(key), context)
            .map_err(|error| TemplateError::Invalid {
                key: key.as_str(),
                reason: error.to_string(),
            })
    }
}
