//! Handles one student command delivered as a JSON payload.
//!
//! Usage:
//!
//! ```text
//! student-bot --payload <event.json> [--dry-run]
//! ```
//!
//! The payload holds the commenter, the comment text, the backend task
//! snapshot, and the tracker issue labels:
//!
//! ```json
//! {
//!   "actor": { "login": "alice" },
//!   "command": "/request-release",
//!   "task": {
//!     "github_issue_id": 2001,
//!     "github_issue_number": 7,
//!     "owner": "org",
//!     "repo": "tasks",
//!     "task_status": "Assigned",
//!     "student_github_login": "alice"
//!   },
//!   "issue": { "labels": [{ "name": "已认领" }] }
//! }
//! ```
//!
//! The reply is posted as one comment on the issue and the command result is
//! written to stdout as JSON. Policy rejections exit successfully; backend or
//! tracker faults exit with a failure status.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use taskboard::{
    config::BotConfig,
    student::{
        adapters::{
            http::{GithubIssueTracker, HttpTaskBackend},
            memory::InMemoryIssueTracker,
        },
        domain::{CommandPayload, CommandResult, CommentTemplates, TemplateError},
        ports::{BackendError, IssueTracker, TrackerError},
        services::{StudentCommandError, StudentCommandService},
    },
    telemetry,
};
use thiserror::Error;
use tracing::{error, info};

/// Errors that stop the bot before a reply is posted.
#[derive(Debug, Error)]
enum BotError {
    #[error("failed to read payload '{path}': {source}")]
    PayloadRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse payload: {0}")]
    PayloadParse(#[from] serde_json::Error),
    #[error("GitHub token is required unless --dry-run is set")]
    MissingToken,
    #[error(transparent)]
    Templates(#[from] TemplateError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Command(#[from] StudentCommandError),
    #[error("failed to write command result: {0}")]
    Output(#[source] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();
    let config = BotConfig::parse();
    match run(&config).await {
        Ok(result) => {
            info!(result = result.result, "command handled");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "command handling failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &BotConfig) -> Result<CommandResult, BotError> {
    let templates = Arc::new(config.load_templates()?);
    let payload = read_payload(&config.payload)?;
    let backend = Arc::new(HttpTaskBackend::new(
        &config.api_endpoint,
        config.http_timeout(),
    )?);

    let result = if config.dry_run {
        let tracker = Arc::new(InMemoryIssueTracker::new());
        respond(config, &payload, backend, tracker, templates).await?
    } else {
        let token = config.github_token.as_deref().ok_or(BotError::MissingToken)?;
        let tracker = Arc::new(GithubIssueTracker::new(
            &config.github_api_base,
            token,
            config.http_timeout(),
        )?);
        respond(config, &payload, backend, tracker, templates).await?
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &result).map_err(|err| BotError::Output(err.into()))?;
    writeln!(stdout).map_err(BotError::Output)?;
    Ok(result)
}

/// Dispatches the payload and posts the reply as one issue comment.
async fn respond<I>(
    config: &BotConfig,
    payload: &CommandPayload,
    backend: Arc<HttpTaskBackend>,
    tracker: Arc<I>,
    templates: Arc<CommentTemplates>,
) -> Result<CommandResult, BotError>
where
    I: IssueTracker,
{
    let service =
        StudentCommandService::new(Arc::clone(&backend), backend, Arc::clone(&tracker), templates)
            .with_policy(config.dispatch_policy());
    let result = service.handle(payload).await?;
    tracker
        .create_comment(&payload.task.locator(), &result.message)
        .await?;
    Ok(result)
}

fn read_payload(path: &Path) -> Result<CommandPayload, BotError> {
    let raw = std::fs::read_to_string(path).map_err(|source| BotError::PayloadRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
