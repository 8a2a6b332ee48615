//! Student slash commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A command a student can issue on a task issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudentCommand {
    /// Claim an open task.
    RequestAssign,
    /// Ask for an assigned task to be marked complete.
    RequestComplete,
    /// Give an assigned task back.
    RequestRelease,
}

impl StudentCommand {
    /// Every supported command.
    pub const ALL: [Self; 3] = [Self::RequestAssign, Self::RequestComplete, Self::RequestRelease];

    /// Parses the command from the payload's command text.
    ///
    /// Surrounding whitespace is ignored. Everything else must match the
    /// canonical spelling exactly, so case variants and trailing words are
    /// unsupported.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == text)
    }

    /// Returns the command name without the leading slash.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RequestAssign => "request-assign",
            Self::RequestComplete => "request-complete",
            Self::RequestRelease => "request-release",
        }
    }

    /// Returns `true` when only the student bound to the task may issue
    /// the command.
    #[must_use]
    pub const fn requires_assigned_student(self) -> bool {
        matches!(self, Self::RequestComplete | Self::RequestRelease)
    }

    /// Returns the canonical slash spelling, e.g. `/request-assign`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestAssign => "/request-assign",
            Self::RequestComplete => "/request-complete",
            Self::RequestRelease => "/request-release",
        }
    }
}

impl fmt::Display for StudentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
