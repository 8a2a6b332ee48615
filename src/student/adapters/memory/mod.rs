//! In-memory adapters for tests and dry runs.

mod backend;
mod tracker;

pub use backend::{BackendCall, InMemoryTaskBackend};
pub use tracker::{InMemoryIssueTracker, TrackerCall};
