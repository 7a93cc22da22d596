//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    /// Status transition not allowed from the current status
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Email must be verified before this operation
    #[error("Email address is not verified")]
    EmailNotVerified,

    /// Amount below the required minimum
    #[error("Amount {amount:.2} is below the minimum of {minimum:.2}")]
    AmountBelowMinimum { amount: f64, minimum: f64 },

    /// Not enough available balance
    #[error("Insufficient balance: requested {requested:.2}, available {available:.2}")]
    InsufficientBalance { requested: f64, available: f64 },

    /// Amount is not a valid positive currency value
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// PayPal email missing or malformed
    #[error("Invalid PayPal email: {0}")]
    InvalidPaypalEmail(String),

    /// No user is available in this context
    #[error("No current user")]
    NoCurrentUser,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidStatusTransition { .. } => ErrorKind::Conflict,
            AccountError::EmailNotVerified => ErrorKind::Forbidden,
            AccountError::AmountBelowMinimum { .. }
            | AccountError::InsufficientBalance { .. }
            | AccountError::InvalidAmount(_)
            | AccountError::InvalidPaypalEmail(_) => ErrorKind::UnprocessableEntity,
            AccountError::NoCurrentUser => ErrorKind::Unauthorized,
            AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidStatusTransition { from, to } => {
                tracing::warn!(from = from, to = to, "Rejected status transition");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}
