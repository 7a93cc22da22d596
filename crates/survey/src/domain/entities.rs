//! Domain Entities
//!
//! Core business entities for the survey session domain.

use kernel::id::{AttachmentId, SurveyId};

/// Reference material attached to a survey
#[derive(Debug, Clone)]
pub struct Attachment {
    pub id: AttachmentId,
    pub display_name: String,
    pub mime_type: String,
    pub byte_size: u64,
    pub fetch_url: String,
}

/// Survey entity - a listed survey as observed by the client
#[derive(Debug, Clone)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub topic: String,
    pub description: Option<String>,
    /// Time limit for one session
    pub duration_minutes: u32,
    /// Reward in USD credited on accepted completion
    pub reward: f64,
    pub slots_total: u32,
    /// Server-reported count at fetch time; authoritative check happens at start
    pub slots_remaining: u32,
    /// Third-party page where the questions actually live
    pub external_url: String,
    pub is_active: bool,
    pub attachments: Vec<Attachment>,
}

impl Survey {
    /// Session time limit in whole seconds
    pub fn total_seconds(&self) -> i64 {
        i64::from(self.duration_minutes) * 60
    }

    /// Check if the survey can be started (listing-level view, not authoritative)
    pub fn is_startable(&self) -> bool {
        self.is_active && self.slots_remaining > 0
    }

    /// Absolute expiry for a session started at `started_at_ms`
    pub fn expires_at_from(&self, started_at_ms: i64) -> i64 {
        started_at_ms + self.total_seconds() * 1000
    }
}

/// Server response to an accepted completion
#[derive(Debug, Clone)]
pub struct CompletionReceipt {
    /// Amount credited to the pending balance
    pub reward_credited: f64,
    /// New pending balance, when the server reports it
    pub pending_balance: Option<f64>,
}
