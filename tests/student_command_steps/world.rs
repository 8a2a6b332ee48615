//! Shared world state for student command BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::student::{
    adapters::memory::{InMemoryIssueTracker, InMemoryTaskBackend},
    domain::{CommandResult, CommentTemplates, TaskSnapshot},
    services::StudentCommandService,
};

/// Dispatcher type used by the BDD world.
pub type TestStudentService =
    StudentCommandService<InMemoryTaskBackend, InMemoryTaskBackend, InMemoryIssueTracker>;

/// Scenario world for student command behaviour tests.
pub struct StudentWorld {
    pub backend: InMemoryTaskBackend,
    pub tracker: InMemoryIssueTracker,
    pub service: TestStudentService,
    pub templates: CommentTemplates,
    pub task: Option<TaskSnapshot>,
    pub labels: Vec<String>,
    pub replies: Vec<(String, CommandResult)>,
}

impl StudentWorld {
    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been set up yet.
    pub fn task(&self) -> Result<&TaskSnapshot, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the most recent command text and reply.
    ///
    /// # Errors
    ///
    /// Returns an error if no command has been issued yet.
    pub fn last_reply(&self) -> Result<&(String, CommandResult), eyre::Report> {
        self.replies
            .last()
            .ok_or_else(|| eyre::eyre!("no command was issued in this scenario"))
    }
}

impl Default for StudentWorld {
    fn default() -> Self {
        let backend = InMemoryTaskBackend::new();
        let tracker = InMemoryIssueTracker::new();
        let templates = CommentTemplates::default();
        let shared = Arc::new(backend.clone());
        let service = StudentCommandService::new(
            Arc::clone(&shared),
            shared,
            Arc::new(tracker.clone()),
            Arc::new(templates.clone()),
        );

        Self {
            backend,
            tracker,
            service,
            templates,
            task: None,
            labels: Vec::new(),
            replies: Vec::new(),
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StudentWorld {
    StudentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
