//! Shared test helpers for in-memory student command integration tests.

use std::sync::Arc;

use rstest::fixture;
use taskboard::student::{
    adapters::memory::{InMemoryIssueTracker, InMemoryTaskBackend},
    domain::{
        Actor, CommandPayload, CommentTemplates, GithubIssueId, IssueNumber, StudentVerification,
        TaskSnapshot, TaskStatus, TrackerIssue,
    },
    services::{DispatchPolicy, StudentCommandService},
};

/// Dispatcher wired to the in-memory adapters.
pub type TestService =
    StudentCommandService<InMemoryTaskBackend, InMemoryTaskBackend, InMemoryIssueTracker>;

/// Backend, tracker and dispatcher sharing the same state.
pub struct Harness {
    pub backend: InMemoryTaskBackend,
    pub tracker: InMemoryIssueTracker,
    pub service: TestService,
}

impl Harness {
    /// Creates a harness applying `policy`.
    #[must_use]
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        let backend = InMemoryTaskBackend::new();
        let tracker = InMemoryIssueTracker::new();
        let shared = Arc::new(backend.clone());
        let service = StudentCommandService::new(
            Arc::clone(&shared),
            shared,
            Arc::new(tracker.clone()),
            Arc::new(CommentTemplates::default()),
        )
        .with_policy(policy);
        Self {
            backend,
            tracker,
            service,
        }
    }

    /// Registers verified students.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend state cannot be updated.
    pub fn verified(&self, logins: &[&str]) -> Result<(), eyre::Report> {
        for login in logins {
            self.backend
                .register_student(*login, StudentVerification::verified())?;
        }
        Ok(())
    }

    /// Stores `task` on the backend and mirrors it onto the tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if either adapter cannot be updated.
    pub fn seed(&self, task: &TaskSnapshot, labels: &[&str]) -> Result<(), eyre::Report> {
        self.backend.insert_task(task.clone())?;
        self.tracker.insert_issue(
            task.locator(),
            labels.iter().copied(),
            task.student_github_login.iter().cloned(),
        )?;
        Ok(())
    }

    /// Returns the backend's current record of `task`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is missing or the state is unreadable.
    pub fn stored(&self, task: &TaskSnapshot) -> Result<TaskSnapshot, eyre::Report> {
        self.backend
            .task(task.github_issue_id)?
            .ok_or_else(|| eyre::eyre!("task {} missing from backend", task.github_issue_id))
    }
}

/// Provides a harness with the default policy.
#[fixture]
pub fn harness() -> Harness {
    Harness::with_policy(DispatchPolicy::default())
}

/// Builds a task snapshot on `org/tasks`.
///
/// # Panics
///
/// Panics if `id` or `number` is zero.
#[must_use]
pub fn snapshot(id: u64, number: u64, status: TaskStatus, student: Option<&str>) -> TaskSnapshot {
    TaskSnapshot {
        github_issue_id: GithubIssueId::new(id).expect("non-zero issue id"),
        github_issue_number: IssueNumber::new(number).expect("non-zero issue number"),
        owner: "org".to_owned(),
        repo: "tasks".to_owned(),
        task_status: status,
        student_github_login: student.map(ToOwned::to_owned),
    }
}

/// Builds a payload as the webhook handler would deliver it.
///
/// # Panics
///
/// Panics if `login` is blank.
#[must_use]
pub fn payload(login: &str, command: &str, task: TaskSnapshot, labels: &[&str]) -> CommandPayload {
    CommandPayload {
        actor: Actor::new(login).expect("non-blank login"),
        command: command.to_owned(),
        task,
        issue: TrackerIssue::with_labels(labels.iter().copied()),
    }
}
