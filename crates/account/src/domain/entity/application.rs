//! Onboarding Application Entity

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::ApplicationStatus;
use crate::error::{AccountError, AccountResult};

/// Free-text answers captured by the onboarding form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAnswers {
    pub experience: String,
    pub motivation: String,
    pub availability: String,
    pub bio: String,
}

/// Onboarding application entity
#[derive(Debug, Clone)]
pub struct Application {
    pub application_id: ApplicationId,
    pub user_id: UserId,
    pub answers: ApplicationAnswers,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Reviewer note, set on rejection
    pub reason: Option<String>,
}

impl Application {
    /// Create a newly submitted application
    pub fn new(user_id: UserId, answers: ApplicationAnswers, now: DateTime<Utc>) -> Self {
        Self {
            application_id: ApplicationId::new(),
            user_id,
            answers,
            status: ApplicationStatus::Pending,
            submitted_at: now,
            decided_at: None,
            reason: None,
        }
    }

    /// Reviewer approved the application
    pub fn approve(&mut self, now: DateTime<Utc>) -> AccountResult<()> {
        if self.status.is_decided() {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: ApplicationStatus::Approved.code(),
            });
        }
        self.status = ApplicationStatus::Approved;
        self.decided_at = Some(now);
        Ok(())
    }

    /// Reviewer rejected the application with a reason
    pub fn reject(&mut self, reason: impl Into<String>, now: DateTime<Utc>) -> AccountResult<()> {
        if self.status.is_decided() {
            return Err(AccountError::InvalidStatusTransition {
                from: self.status.code(),
                to: ApplicationStatus::Rejected.code(),
            });
        }
        self.status = ApplicationStatus::Rejected;
        self.decided_at = Some(now);
        self.reason = Some(reason.into());
        Ok(())
    }
}
