//! Account Module
//!
//! Domain model for the user/profile collaborator of the survey core:
//! - Closed status taxonomies (user, application, withdrawal)
//! - Profile entity with reconciliation-only balance updates
//! - Application and withdrawal entities with guarded transitions
//! - `UserContext` capability trait injected into the survey session
//!
//! ## Design Model
//! - Balances are display projections; only server-confirmed deltas mutate them
//! - Status enums are closed and exhaustively matched at every consumption site
//! - No ambient global user object: callers receive a `UserContext` capability

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::context::UserContext;
pub use error::{AccountError, AccountResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
