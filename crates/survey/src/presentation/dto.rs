//! Wire DTOs
//!
//! JSON shapes exchanged with the backend. Field names are camelCase on the
//! wire.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Attachment, CompletionReceipt, Survey};
use crate::error::{SessionError, SessionResult};
use kernel::id::{AttachmentId, SurveyId};

/// Standard `{ "data": ... }` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Survey as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDto {
    pub id: String,
    pub title: String,
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub reward: f64,
    pub slots_total: u32,
    pub slots_remaining: u32,
    pub external_url: String,
    pub is_active: bool,
    #[serde(default)]
    pub attachments: Vec<AttachmentDto>,
}

impl SurveyDto {
    pub fn into_survey(self) -> SessionResult<Survey> {
        let id: SurveyId = self
            .id
            .parse()
            .map_err(|_| SessionError::Internal(format!("Invalid survey id: {}", self.id)))?;
        let attachments = self
            .attachments
            .into_iter()
            .map(AttachmentDto::into_attachment)
            .collect::<SessionResult<_>>()?;
        Ok(Survey {
            id,
            title: self.title,
            topic: self.topic,
            description: self.description,
            duration_minutes: self.duration_minutes,
            reward: self.reward,
            slots_total: self.slots_total,
            slots_remaining: self.slots_remaining,
            external_url: self.external_url,
            is_active: self.is_active,
            attachments,
        })
    }
}

/// Attachment metadata as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDto {
    pub id: String,
    pub display_name: String,
    pub mime_type: String,
    pub byte_size: u64,
    pub fetch_url: String,
}

impl AttachmentDto {
    pub fn into_attachment(self) -> SessionResult<Attachment> {
        let id: AttachmentId = self
            .id
            .parse()
            .map_err(|_| SessionError::Internal(format!("Invalid attachment id: {}", self.id)))?;
        Ok(Attachment {
            id,
            display_name: self.display_name,
            mime_type: self.mime_type,
            byte_size: self.byte_size,
            fetch_url: self.fetch_url,
        })
    }
}

/// Body of an accepted completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResponseDto {
    pub reward_credited: f64,
    #[serde(default)]
    pub pending_balance: Option<f64>,
}

impl CompleteResponseDto {
    pub fn into_receipt(self) -> CompletionReceipt {
        CompletionReceipt {
            reward_credited: self.reward_credited,
            pending_balance: self.pending_balance,
        }
    }
}
