//! Dispatch policy knobs.

use crate::student::domain::{DEFAULT_CLAIMED_LABEL, StudentCommand};
use clap::ValueEnum;

/// Which backend transitions have their boolean answer checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TransitionCheck {
    /// A `false` answer from any transition becomes the API error reply.
    #[default]
    AllTransitions,
    /// Only `/request-assign` is checked; completion and release always
    /// report success.
    AssignOnly,
}

impl TransitionCheck {
    /// Returns `true` when the answer to `command`'s transition is checked.
    #[must_use]
    pub const fn checks(self, command: StudentCommand) -> bool {
        match self {
            Self::AllTransitions => true,
            Self::AssignOnly => matches!(command, StudentCommand::RequestAssign),
        }
    }
}

/// Order of tracker cleanup and backend release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReleaseOrder {
    /// Clean up the tracker, then release on the backend.
    #[default]
    TrackerFirst,
    /// Release on the backend and clean up the tracker only once the backend
    /// accepted.
    BackendFirst,
}

/// Policy applied by the command dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Which transition answers are checked.
    pub transition_check: TransitionCheck,
    /// Order of the release side effects.
    pub release_order: ReleaseOrder,
    /// Whether claiming requires a signed contract.
    pub require_contract: bool,
    /// Tracker label that marks a claimed task.
    pub claimed_label: String,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            transition_check: TransitionCheck::default(),
            release_order: ReleaseOrder::default(),
            require_contract: false,
            claimed_label: DEFAULT_CLAIMED_LABEL.to_owned(),
        }
    }
}
