//! Domain Value Objects
//!
//! Immutable value types for the survey session domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a survey-taking session
///
/// ```text
/// idle -> loading -> ready -> in_progress -> completing -> completed
///            |                     |              |
///            v                     v              v
///          error               expired      error (rejected)
/// ```
///
/// `completed` and `expired` are terminal. `error` allows a retry back
/// through `loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No survey selected yet
    #[default]
    Idle,

    /// Survey details being fetched
    Loading,

    /// Survey loaded, not yet started
    Ready,

    /// Slot reserved, countdown running
    InProgress,

    /// Completion submitted, awaiting server verdict
    Completing,

    /// Server accepted the completion - terminal
    Completed,

    /// Time limit reached before completion - terminal
    Expired,

    /// Load or completion failure, retry allowed
    Error,
}

impl SessionState {
    /// Get string code for serialization/display
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::InProgress => "in_progress",
            Self::Completing => "completing",
            Self::Completed => "completed",
            Self::Expired => "expired",
            Self::Error => "error",
        }
    }

    /// Check if no further transition is defined
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Expired)
    }

    /// Check if a countdown should be running in this state
    #[inline]
    pub const fn has_active_timer(&self) -> bool {
        matches!(self, Self::InProgress | Self::Completing)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "idle" => Some(Self::Idle),
            "loading" => Some(Self::Loading),
            "ready" => Some(Self::Ready),
            "in_progress" => Some(Self::InProgress),
            "completing" => Some(Self::Completing),
            "completed" => Some(Self::Completed),
            "expired" => Some(Self::Expired),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
