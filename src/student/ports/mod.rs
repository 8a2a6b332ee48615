//! Port contracts for student command handling.
//!
//! Ports define infrastructure-agnostic interfaces to the task backend and
//! the issue tracker.

pub mod backend;
pub mod tracker;

pub use backend::{BackendError, BackendResult, StudentDirectory, TaskTransitions};
pub use tracker::{IssueTracker, TrackerError, TrackerResult};
