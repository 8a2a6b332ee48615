//! HTTP adapters for the task backend and the GitHub REST API.

mod backend;
mod github;

pub use backend::HttpTaskBackend;
pub use github::GithubIssueTracker;

const ERROR_BODY_LIMIT: usize = 512;

/// Trims a response body for inclusion in an error message.
fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", trimmed.get(..cut).unwrap_or_default()),
        None => trimmed.to_owned(),
    }
}
