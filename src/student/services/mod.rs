//! Application services for student command handling.

mod cleanup;
mod dispatcher;
mod policy;

pub use cleanup::{CleanupReport, TrackerCleanup};
pub use dispatcher::{StudentCommandError, StudentCommandResult, StudentCommandService};
pub use policy::{DispatchPolicy, ReleaseOrder, TransitionCheck};
