//! Withdrawal Entity
//!
//! PayPal payout request. The client only ever creates a `pending` request;
//! the admin-side transitions are modeled so status updates coming back from
//! the server can be validated before display.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WithdrawalId};

use crate::domain::entity::user::MIN_WITHDRAWAL_USD;
use crate::domain::value_object::WithdrawalStatus;
use crate::error::{AccountError, AccountResult};

/// Withdrawal request entity
#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub withdrawal_id: WithdrawalId,
    pub user_id: UserId,
    pub amount: f64,
    pub paypal_email: String,
    pub status: WithdrawalStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Withdrawal {
    /// Create a new withdrawal request after validating amount and payout address
    pub fn request(
        user_id: UserId,
        amount: f64,
        paypal_email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> AccountResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AccountError::InvalidAmount(amount));
        }
        if amount < MIN_WITHDRAWAL_USD {
            return Err(AccountError::AmountBelowMinimum {
                amount,
                minimum: MIN_WITHDRAWAL_USD,
            });
        }
        let paypal_email = paypal_email.into();
        if !paypal_email.contains('@') {
            return Err(AccountError::InvalidPaypalEmail(paypal_email));
        }

        tracing::info!(
            user_id = %user_id,
            amount = amount,
            "Withdrawal requested"
        );

        Ok(Self {
            withdrawal_id: WithdrawalId::new(),
            user_id,
            amount,
            paypal_email,
            status: WithdrawalStatus::Pending,
            requested_at: now,
            processed_at: None,
        })
    }

    /// Admin approved the payout
    pub fn approve(&mut self, now: DateTime<Utc>) -> AccountResult<()> {
        self.transition(WithdrawalStatus::Approved, now)
    }

    /// Admin rejected the payout
    pub fn reject(&mut self, now: DateTime<Utc>) -> AccountResult<()> {
        self.transition(WithdrawalStatus::Rejected, now)
    }

    /// Payout confirmed sent via PayPal
    pub fn mark_paid(&mut self, now: DateTime<Utc>) -> AccountResult<()> {
        self.transition(WithdrawalStatus::Paid, now)
    }

    fn transition(&mut self, next: WithdrawalStatus, now: DateTime<Utc>) -> AccountResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: next.code(),
            });
        }
        self.status = next;
        self.processed_at = Some(now);
        Ok(())
    }
}
