//! User Profile Entity
//!
//! The participant profile observed by the survey core. Balance fields are
//! display projections of server state: the only mutators apply
//! server-confirmed deltas, never speculative client-side math.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::UserStatus;
use crate::error::{AccountError, AccountResult};

/// Minimum withdrawable amount in USD
pub const MIN_WITHDRAWAL_USD: f64 = 5.00;

/// User profile entity
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    pub status: UserStatus,
    /// Available balance (withdrawable)
    pub balance: f64,
    /// Earnings awaiting settlement
    pub pending_balance: f64,
    pub paypal_email: Option<String>,
    pub notify_on_surveys: bool,
    pub applied_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Create a freshly registered profile
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(),
            email: email.into(),
            name: name.into(),
            email_verified: false,
            status: UserStatus::EmailUnverified,
            balance: 0.0,
            pending_balance: 0.0,
            paypal_email: None,
            notify_on_surveys: true,
            applied_at: None,
            approved_at: None,
        }
    }

    /// Check if the user may browse and start surveys
    pub fn can_take_surveys(&self) -> bool {
        self.status.can_take_surveys()
    }

    /// Check if the available balance meets the withdrawal minimum
    pub fn can_withdraw(&self) -> bool {
        self.balance >= MIN_WITHDRAWAL_USD
    }

    // ========================================================================
    // Onboarding transitions
    // ========================================================================

    /// Email verification confirmed
    pub fn verify_email(&mut self) -> AccountResult<()> {
        if self.status != UserStatus::EmailUnverified {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: UserStatus::EmailVerified.code(),
            });
        }
        self.email_verified = true;
        self.status = UserStatus::EmailVerified;
        Ok(())
    }

    /// Onboarding application submitted
    pub fn submit_application(&mut self, now: DateTime<Utc>) -> AccountResult<()> {
        if !self.email_verified {
            return Err(AccountError::EmailNotVerified);
        }
        if !self.status.can_apply() {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: UserStatus::ApplicationSubmitted.code(),
            });
        }
        self.status = UserStatus::ApplicationSubmitted;
        self.applied_at = Some(now);
        Ok(())
    }

    /// Admin approved the application
    pub fn approve(&mut self, now: DateTime<Utc>) -> AccountResult<()> {
        if self.status != UserStatus::ApplicationSubmitted {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: UserStatus::ApplicationApproved.code(),
            });
        }
        self.status = UserStatus::ApplicationApproved;
        self.approved_at = Some(now);
        Ok(())
    }

    /// Admin rejected the application - terminal
    pub fn reject(&mut self) -> AccountResult<()> {
        if self.status != UserStatus::ApplicationSubmitted {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: UserStatus::ApplicationRejected.code(),
            });
        }
        self.status = UserStatus::ApplicationRejected;
        Ok(())
    }

    // ========================================================================
    // Balance reconciliation (server-confirmed deltas only)
    // ========================================================================

    /// Credit a server-confirmed reward into the pending balance
    pub fn credit_pending(&mut self, amount: f64) -> AccountResult<()> {
        validate_amount(amount)?;
        self.pending_balance += amount;
        tracing::info!(
            user_id = %self.user_id,
            amount = amount,
            pending_balance = self.pending_balance,
            "Pending balance credited"
        );
        Ok(())
    }

    /// Move a server-confirmed settled amount from pending to available
    pub fn settle_pending(&mut self, amount: f64) -> AccountResult<()> {
        validate_amount(amount)?;
        if amount > self.pending_balance {
            return Err(AccountError::InsufficientBalance {
                requested: amount,
                available: self.pending_balance,
            });
        }
        self.pending_balance -= amount;
        self.balance += amount;
        Ok(())
    }

    /// Apply a server-confirmed withdrawal debit against the available balance
    pub fn debit_balance(&mut self, amount: f64) -> AccountResult<()> {
        validate_amount(amount)?;
        if amount > self.balance {
            return Err(AccountError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        tracing::info!(
            user_id = %self.user_id,
            amount = amount,
            balance = self.balance,
            "Balance debited"
        );
        Ok(())
    }
}

/// Validate a currency amount: finite and strictly positive
fn validate_amount(amount: f64) -> AccountResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AccountError::InvalidAmount(amount));
    }
    Ok(())
}
