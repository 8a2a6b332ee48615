//! Error types for student domain validation, parsing, and templating.

use thiserror::Error;

/// Errors returned while constructing student domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StudentDomainError {
    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),

    /// The issue identifier is invalid.
    #[error("invalid github issue id {0}, expected a positive integer")]
    InvalidIssueId(u64),

    /// A tracker login is empty after trimming.
    #[error("login must not be empty")]
    EmptyLogin,
}

/// Error returned while parsing task statuses from backend payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Errors raised while loading or rendering comment templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read comment templates from '{path}': {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The template document is not valid JSON for the catalogue.
    #[error("failed to parse comment templates: {0}")]
    Parse(#[from] serde_json::Error),

    /// A template failed to compile or render.
    #[error("comment template '{key}' is invalid: {reason}")]
    Invalid {
        /// Catalogue key of the template.
        key: &'static str,
        /// Rendering failure reason.
        reason: String,
    },
}
