//! Survey Session Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, catalog trait
//! - `application/` - Session state machine, countdown timer
//! - `infra/` - HTTP catalog implementation
//! - `presentation/` - DTOs and view projection
//!
//! ## Trust Model
//! - The backend is the sole authority for slot reservation, reward amounts,
//!   and completion acceptance
//! - The client enforces the minimum-time gate locally before any completion
//!   request is sent, but the server re-validates
//! - Countdown display derives from an absolute expiry timestamp captured at
//!   start, never from accumulated tick deltas

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SessionConfig;
pub use application::session::SurveySession;
pub use application::timer::{SessionTimer, TimerEvent, TimerHandle};
pub use domain::value_objects::SessionState;
pub use error::{SessionError, SessionResult};
pub use infra::http::HttpSurveyCatalog;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
