//! Startup configuration.
//!
//! Configuration is resolved once when the binary starts, from flags or the
//! matching environment variables, and handed to the components that need
//! it. Nothing below this module reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::student::{
    domain::{CommentTemplates, DEFAULT_CLAIMED_LABEL, TemplateError},
    services::{DispatchPolicy, ReleaseOrder, TransitionCheck},
};

/// Default timeout for backend and tracker requests.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_owned());
    }
    Ok(parsed)
}

/// Student bot configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "student-bot",
    about = "Handle one student task command and post the reply",
    version
)]
pub struct BotConfig {
    /// JSON command payload to handle.
    #[arg(long)]
    pub payload: PathBuf,

    /// Base URL of the task backend API.
    #[arg(long, env = "API_ENDPOINT")]
    pub api_endpoint: String,

    /// GitHub token used for tracker calls.
    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        required_unless_present = "dry_run"
    )]
    pub github_token: Option<String>,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_BASE", default_value = DEFAULT_GITHUB_API_BASE)]
    pub github_api_base: String,

    /// Optional JSON file overriding the reply templates.
    #[arg(long, env = "TASKBOARD_MESSAGES")]
    pub messages: Option<PathBuf>,

    /// Tracker label that marks a claimed task.
    #[arg(long, env = "TASKBOARD_CLAIMED_LABEL", default_value = DEFAULT_CLAIMED_LABEL)]
    pub claimed_label: String,

    /// Which backend transitions have their answer checked.
    #[arg(
        long,
        env = "TASKBOARD_TRANSITION_CHECK",
        value_enum,
        default_value_t = TransitionCheck::AllTransitions
    )]
    pub transition_check: TransitionCheck,

    /// Order of tracker cleanup and backend release.
    #[arg(
        long,
        env = "TASKBOARD_RELEASE_ORDER",
        value_enum,
        default_value_t = ReleaseOrder::TrackerFirst
    )]
    pub release_order: ReleaseOrder,

    /// Require a signed contract before a student can claim a task.
    #[arg(long, env = "TASKBOARD_REQUIRE_CONTRACT")]
    pub require_contract: bool,

    /// Request timeout in milliseconds.
    #[arg(
        long,
        env = "TASKBOARD_HTTP_TIMEOUT_MS",
        default_value_t = DEFAULT_HTTP_TIMEOUT_MS,
        value_parser = parse_positive_u64
    )]
    pub http_timeout_ms: u64,

    /// Record tracker writes in memory instead of sending them.
    #[arg(long)]
    pub dry_run: bool,
}

impl BotConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Returns the dispatch policy selected by the configuration.
    #[must_use]
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            transition_check: self.transition_check,
            release_order: self.release_order,
            require_contract: self.require_contract,
            claimed_label: self.claimed_label.clone(),
        }
    }

    /// Loads the reply templates, falling back to the built-in catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the configured file cannot be read,
    /// parsed, or compiled.
    pub fn load_templates(&self) -> Result<CommentTemplates, TemplateError> {
        self.messages
            .as_deref()
            .map_or_else(|| Ok(CommentTemplates::default()), CommentTemplates::from_path)
    }
}
