//! User Status Value Object
//!
//! Lifecycle of a participant account from registration to approval.
//!
//! ## Design Decisions
//! - **Closed enum, API-backed vocabulary**: the canonical codes are the
//!   ones the backend emits (`email_unverified`, `email_verified`,
//!   `application_submitted`, `application_approved`,
//!   `application_rejected`). The legacy mock vocabulary
//!   (`pending_application`, `pending_review`) is not modeled.
//! - **One-way flow**: the only transitions are the onboarding funnel and
//!   the reviewer decision; rejection is terminal.
//! - **Routing is a property of status**: each status owns the page the
//!   client must land on, so guards cannot disagree with each other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserStatus {
    /// Registered, verification code not yet confirmed
    #[default]
    EmailUnverified = 0,

    /// Email confirmed, onboarding application not yet submitted
    EmailVerified = 1,

    /// Application submitted, waiting for admin review
    ApplicationSubmitted = 2,

    /// Application approved - full access to surveys and wallet
    ApplicationApproved = 3,

    /// Application rejected - terminal
    ApplicationRejected = 4,
}

impl UserStatus {
    /// Get numeric ID for storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmailUnverified => "email_unverified",
            Self::EmailVerified => "email_verified",
            Self::ApplicationSubmitted => "application_submitted",
            Self::ApplicationApproved => "application_approved",
            Self::ApplicationRejected => "application_rejected",
        }
    }

    /// The page a client with this status must be routed to
    #[inline]
    pub const fn route_path(&self) -> &'static str {
        match self {
            Self::EmailUnverified => "/verify-email",
            Self::EmailVerified => "/application",
            Self::ApplicationSubmitted => "/pending-review",
            Self::ApplicationApproved => "/dashboard",
            Self::ApplicationRejected => "/application-rejected",
        }
    }

    /// Check if the user may browse and start surveys
    #[inline]
    pub const fn can_take_surveys(&self) -> bool {
        matches!(self, Self::ApplicationApproved)
    }

    /// Check if the user may submit an onboarding application
    #[inline]
    pub const fn can_apply(&self) -> bool {
        matches!(self, Self::EmailVerified)
    }

    /// Check if this is a terminal state (no further transition defined)
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ApplicationRejected)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::EmailUnverified),
            1 => Some(Self::EmailVerified),
            2 => Some(Self::ApplicationSubmitted),
            3 => Some(Self::ApplicationApproved),
            4 => Some(Self::ApplicationRejected),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "email_unverified" => Some(Self::EmailUnverified),
            "email_verified" => Some(Self::EmailVerified),
            "application_submitted" => Some(Self::ApplicationSubmitted),
            "application_approved" => Some(Self::ApplicationApproved),
            "application_rejected" => Some(Self::ApplicationRejected),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
