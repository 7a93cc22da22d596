//! Withdrawal Status Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status of a PayPal withdrawal request
///
/// Flow: `pending -> {approved, rejected}`, `approved -> paid`.
/// `rejected` and `paid` are settled states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum WithdrawalStatus {
    /// Requested by the user, waiting for admin review
    #[default]
    Pending = 0,

    /// Approved, payout not yet sent
    Approved = 1,

    /// Rejected by an admin (funds returned to balance server-side)
    Rejected = 2,

    /// Payout sent via PayPal
    Paid = 3,
}

impl WithdrawalStatus {
    /// Get numeric ID for storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }

    /// Check if no further transition is defined
    #[inline]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Rejected | Self::Paid)
    }

    /// Check whether a transition to `next` is allowed
    #[inline]
    pub const fn can_transition_to(&self, next: WithdrawalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::Paid)
        )
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            3 => Some(Self::Paid),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for status in [
            WithdrawalStatus::Pending,
            WithdrawalStatus::Approved,
            WithdrawalStatus::Rejected,
            WithdrawalStatus::Paid,
        ] {
            assert_eq!(WithdrawalStatus::from_code(status.code()), Some(status));
            assert_eq!(WithdrawalStatus::from_id(status.id()), Some(status));
        }
    }

    #[test]
    fn test_transitions() {
        use WithdrawalStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Paid));

        assert!(!Pending.can_transition_to(Paid));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Approved));
    }

    #[test]
    fn test_is_settled() {
        assert!(!WithdrawalStatus::Pending.is_settled());
        assert!(!WithdrawalStatus::Approved.is_settled());
        assert!(WithdrawalStatus::Rejected.is_settled());
        assert!(WithdrawalStatus::Paid.is_settled());
    }
}
