//! Survey Session Error Types
//!
//! Session-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Survey session error variants
///
/// `Clone` so the state machine can both surface an error to the caller and
/// retain it for display.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// Survey does not exist or is no longer listed
    #[error("Survey not found")]
    NotFound,

    /// Transport-level failure (timeout, DNS, connection refused)
    #[error("Network error: {0}")]
    Network(String),

    /// All slots taken between listing and start
    #[error("No slots remaining for this survey")]
    SlotUnavailable,

    /// Completion attempted before the minimum elapsed time
    #[error(
        "Completion attempted at {percent_elapsed:.1}% elapsed, {required:.0}% required"
    )]
    PrematureCompletion { percent_elapsed: f64, required: f64 },

    /// Server refused the completion submission
    #[error("Completion rejected: {0}")]
    CompletionRejected(String),

    /// Session time limit reached
    #[error("Session expired")]
    Expired,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::NotFound => ErrorKind::NotFound,
            SessionError::Network(_) => ErrorKind::ServiceUnavailable,
            SessionError::SlotUnavailable => ErrorKind::Conflict,
            SessionError::PrematureCompletion { .. } => ErrorKind::UnprocessableEntity,
            SessionError::CompletionRejected(_) => ErrorKind::Conflict,
            SessionError::Expired => ErrorKind::Gone,
            SessionError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Check whether the failed operation can be retried as-is
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::Network(_) | SessionError::SlotUnavailable)
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            SessionError::Internal(msg) => {
                tracing::error!(message = %msg, "Session internal error");
            }
            SessionError::Network(msg) => {
                tracing::warn!(message = %msg, "Session network error");
            }
            SessionError::PrematureCompletion {
                percent_elapsed,
                required,
            } => {
                tracing::warn!(
                    percent_elapsed = percent_elapsed,
                    required = required,
                    "Premature completion attempt"
                );
            }
            SessionError::CompletionRejected(msg) => {
                tracing::warn!(message = %msg, "Completion rejected by server");
            }
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            SessionError::Network(err.to_string())
        } else if err.is_decode() {
            SessionError::Internal(format!("Malformed response: {err}"))
        } else {
            SessionError::Network(err.to_string())
        }
    }
}
