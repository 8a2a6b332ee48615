//! In-memory task backend that records every call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::student::{
    domain::{
        ActiveTask, CommandRequest, GithubIssueId, StudentVerification, TaskSnapshot, TaskStatus,
    },
    ports::{BackendError, BackendResult, StudentDirectory, TaskTransitions},
};

/// A call received by [`InMemoryTaskBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// Identity check for a login.
    VerifyIdentity(String),
    /// Active-task lookup for a login.
    ActiveTask(String),
    /// Claim transition.
    RequestAssign(CommandRequest),
    /// Completion transition.
    RequestComplete(CommandRequest),
    /// Release transition.
    Release(CommandRequest),
}

impl BackendCall {
    /// Returns `true` for state-changing calls.
    #[must_use]
    pub const fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::RequestAssign(_) | Self::RequestComplete(_) | Self::Release(_)
        )
    }
}

/// Thread-safe in-memory task backend.
///
/// Transitions follow the backend's rules: a claim needs an open task, and
/// completion or release need the requesting student to hold the task.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    students: HashMap<String, StudentVerification>,
    tasks: HashMap<GithubIssueId, TaskSnapshot>,
    calls: Vec<BackendCall>,
    reject_transitions: bool,
}

impl InMemoryTaskBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a student and the outcome of their identity check.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the state lock is poisoned.
    pub fn register_student(
        &self,
        login: impl Into<String>,
        verification: StudentVerification,
    ) -> BackendResult<()> {
        self.write()?.students.insert(login.into(), verification);
        Ok(())
    }

    /// Stores or replaces a task record.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the state lock is poisoned.
    pub fn insert_task(&self, task: TaskSnapshot) -> BackendResult<()> {
        self.write()?.tasks.insert(task.github_issue_id, task);
        Ok(())
    }

    /// Makes every subsequent transition answer `false`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the state lock is poisoned.
    pub fn reject_transitions(&self) -> BackendResult<()> {
        self.write()?.reject_transitions = true;
        Ok(())
    }

    /// Returns the current record of a task.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the state lock is poisoned.
    pub fn task(&self, id: GithubIssueId) -> BackendResult<Option<TaskSnapshot>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    /// Returns every call received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the state lock is poisoned.
    pub fn calls(&self) -> BackendResult<Vec<BackendCall>> {
        Ok(self.read()?.calls.clone())
    }

    fn read(&self) -> BackendResult<std::sync::RwLockReadGuard<'_, InMemoryBackendState>> {
        self.state.read().map_err(|err| {
            BackendError::transport("memory", std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BackendResult<std::sync::RwLockWriteGuard<'_, InMemoryBackendState>> {
        self.state.write().map_err(|err| {
            BackendError::transport("memory", std::io::Error::other(err.to_string()))
        })
    }

    /// Records `call` and applies `change` to the task when allowed.
    fn transition(
        &self,
        call: BackendCall,
        request: &CommandRequest,
        change: impl FnOnce(&mut TaskSnapshot) -> bool,
    ) -> BackendResult<bool> {
        let mut state = self.write()?;
        state.calls.push(call);
        if state.reject_transitions {
            return Ok(false);
        }
        Ok(state
            .tasks
            .get_mut(&request.github_issue_id)
            .is_some_and(change))
    }
}

const fn is_active(status: TaskStatus) -> bool {
    matches!(
        status,
        TaskStatus::RequestAssign | TaskStatus::Assigned | TaskStatus::RequestComplete
    )
}

#[async_trait]
impl StudentDirectory for InMemoryTaskBackend {
    async fn verify_identity(&self, login: &str) -> BackendResult<StudentVerification> {
        let mut state = self.write()?;
        state.calls.push(BackendCall::VerifyIdentity(login.to_owned()));
        Ok(state
            .students
            .get(login)
            .cloned()
            .unwrap_or_else(StudentVerification::rejected))
    }

    async fn active_task(&self, login: &str) -> BackendResult<Option<ActiveTask>> {
        let mut state = self.write()?;
        state.calls.push(BackendCall::ActiveTask(login.to_owned()));
        Ok(state
            .tasks
            .values()
            .find(|task| task.is_bound_to(login) && is_active(task.task_status))
            .map(ActiveTask::from))
    }
}

#[async_trait]
impl TaskTransitions for InMemoryTaskBackend {
    async fn request_assign(&self, request: &CommandRequest) -> BackendResult<bool> {
        let login = request.student_login.clone();
        self.transition(
            BackendCall::RequestAssign(request.clone()),
            request,
            move |task| {
                if task.task_status != TaskStatus::Open {
                    return false;
                }
                task.task_status = TaskStatus::RequestAssign;
                task.student_github_login = Some(login);
                true
            },
        )
    }

    async fn request_complete(&self, request: &CommandRequest) -> BackendResult<bool> {
        self.transition(
            BackendCall::RequestComplete(request.clone()),
            request,
            |task| {
                if task.task_status != TaskStatus::Assigned
                    || !task.is_bound_to(&request.student_login)
                {
                    return false;
                }
                task.task_status = TaskStatus::RequestComplete;
                true
            },
        )
    }

    async fn release(&self, request: &CommandRequest) -> BackendResult<bool> {
        self.transition(BackendCall::Release(request.clone()), request, |task| {
            if !is_active(task.task_status) || !task.is_bound_to(&request.student_login) {
                return false;
            }
            task.task_status = TaskStatus::Open;
            task.student_github_login = None;
            true
        })
    }
}
