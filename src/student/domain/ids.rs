//! Identifier and validated scalar types for tracker issues.

use super::StudentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable tracker-wide issue identifier.
///
/// Unlike [`IssueNumber`], this value does not change when an issue moves
/// between repositories, so the backend keys tasks by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct GithubIssueId(u64);

impl GithubIssueId {
    /// Creates a validated issue identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StudentDomainError::InvalidIssueId`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, StudentDomainError> {
        if value == 0 {
            return Err(StudentDomainError::InvalidIssueId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for GithubIssueId {
    type Error = StudentDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GithubIssueId> for u64 {
    fn from(id: GithubIssueId) -> Self {
        id.0
    }
}

impl fmt::Display for GithubIssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository-local issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`StudentDomainError::InvalidIssueNumber`] when the value is
    /// zero.
    pub const fn new(value: u64) -> Result<Self, StudentDomainError> {
        if value == 0 {
            return Err(StudentDomainError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for IssueNumber {
    type Error = StudentDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueNumber> for u64 {
    fn from(number: IssueNumber) -> Self {
        number.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
