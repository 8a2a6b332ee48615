//! Mocks and fixtures shared by the student unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use crate::student::{
    domain::{
        ActiveTask, Actor, CommandRequest, CommentTemplates, GithubIssueId, IssueLocator,
        IssueNumber, StudentVerification, TaskSnapshot, TaskStatus,
    },
    ports::{
        BackendResult, IssueTracker, StudentDirectory, TaskTransitions, TrackerResult,
    },
    services::{DispatchPolicy, StudentCommandService},
};

mock! {
    pub Directory {}

    #[async_trait]
    impl StudentDirectory for Directory {
        async fn verify_identity(&self, login: &str) -> BackendResult<StudentVerification>;
        async fn active_task(&self, login: &str) -> BackendResult<Option<ActiveTask>>;
    }
}

mock! {
    pub Transitions {}

    #[async_trait]
    impl TaskTransitions for Transitions {
        async fn request_assign(&self, request: &CommandRequest) -> BackendResult<bool>;
        async fn request_complete(&self, request: &CommandRequest) -> BackendResult<bool>;
        async fn release(&self, request: &CommandRequest) -> BackendResult<bool>;
    }
}

mock! {
    pub Tracker {}

    #[async_trait]
    impl IssueTracker for Tracker {
        async fn remove_label(&self, issue: &IssueLocator, label: &str) -> TrackerResult<bool>;
        async fn remove_assignee(&self, issue: &IssueLocator, login: &str) -> TrackerResult<()>;
        async fn create_comment(&self, issue: &IssueLocator, body: &str) -> TrackerResult<()>;
    }
}

pub type MockService = StudentCommandService<MockDirectory, MockTransitions, MockTracker>;

pub const ISSUE_ID: u64 = 2001;
pub const ISSUE_NUMBER: u64 = 7;

pub fn task(status: TaskStatus, student: Option<&str>) -> TaskSnapshot {
    TaskSnapshot {
        github_issue_id: GithubIssueId::new(ISSUE_ID).expect("valid issue id"),
        github_issue_number: IssueNumber::new(ISSUE_NUMBER).expect("valid issue number"),
        owner: "org".to_owned(),
        repo: "tasks".to_owned(),
        task_status: status,
        student_github_login: student.map(ToOwned::to_owned),
    }
}

pub fn actor(login: &str) -> Actor {
    Actor::new(login).expect("valid login")
}

pub fn templates() -> CommentTemplates {
    CommentTemplates::default()
}

pub fn render_default(key: crate::student::domain::MessageKey, command: &str) -> String {
    templates()
        .render(
            key,
            &crate::student::domain::TemplateContext {
                command,
                claimed_label: crate::student::domain::DEFAULT_CLAIMED_LABEL,
            },
        )
        .expect("default templates render")
}

pub fn service(
    directory: MockDirectory,
    transitions: MockTransitions,
    tracker: MockTracker,
) -> MockService {
    service_with_policy(directory, transitions, tracker, DispatchPolicy::default())
}

pub fn service_with_policy(
    directory: MockDirectory,
    transitions: MockTransitions,
    tracker: MockTracker,
    policy: DispatchPolicy,
) -> MockService {
    StudentCommandService::new(
        Arc::new(directory),
        Arc::new(transitions),
        Arc::new(tracker),
        Arc::new(templates()),
    )
    .with_policy(policy)
}
