//! Shared error taxonomy for upstream calls and orchestration.

use thiserror::Error;

/// Errors produced by upstream calls, orchestrators and the fan-out executor.
///
/// Failures are always carried as values on task result channels, never by
/// unwinding, so a single orchestrator can observe the first failure among
/// concurrent tasks and turn it into one error payload.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input was missing or empty (400-equivalent).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure reaching the upstream service.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream service answered with a non-2xx status.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The upstream body could not be decoded as the expected JSON.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// A logical lookup miss (e.g. breed id not present in the list).
    #[error("not found: {0}")]
    NotFound(String),

    /// A spawned task dropped its result channel without delivering a value.
    #[error("task aborted before delivering a result")]
    TaskAborted,
}

impl ApiError {
    /// Whether this error came from the upstream service rather than
    /// from input validation or local coordination.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ApiError::Unreachable(_) | ApiError::Upstream { .. } | ApiError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}
