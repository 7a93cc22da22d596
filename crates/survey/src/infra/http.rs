//! HTTP Catalog Implementation
//!
//! `SurveyCatalog` backed by the REST API. Status-code mapping is the single
//! place where wire-level failures become domain errors.

use reqwest::StatusCode;

use crate::application::config::SessionConfig;
use crate::domain::entities::{CompletionReceipt, Survey};
use crate::domain::repository::SurveyCatalog;
use crate::error::{SessionError, SessionResult};
use crate::presentation::dto::{CompleteResponseDto, DataEnvelope, SurveyDto};
use kernel::id::SurveyId;

/// HTTP implementation of the survey catalog
#[derive(Debug, Clone)]
pub struct HttpSurveyCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSurveyCatalog {
    pub fn new(config: &SessionConfig) -> SessionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SurveyCatalog for HttpSurveyCatalog {
    async fn list_public(&self) -> SessionResult<Vec<Survey>> {
        let response = self.client.get(self.url("/surveys/public")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_error_status(status, None));
        }

        let envelope: DataEnvelope<Vec<SurveyDto>> = response.json().await?;
        let surveys: Vec<Survey> = envelope
            .data
            .into_iter()
            .map(SurveyDto::into_survey)
            .collect::<SessionResult<_>>()?;

        tracing::info!(count = surveys.len(), "Survey listing fetched");
        Ok(surveys)
    }

    async fn fetch(&self, survey_id: SurveyId) -> SessionResult<Option<Survey>> {
        // The public surface has no single-survey endpoint; resolve through
        // the listing
        let surveys = self.list_public().await?;
        Ok(surveys.into_iter().find(|s| s.id == survey_id))
    }

    async fn start(&self, survey_id: SurveyId) -> SessionResult<()> {
        let response = self
            .client
            .post(self.url(&format!("/surveys/{survey_id}/start")))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let err = map_error_status(status, Some(message));
            tracing::warn!(
                survey_id = %survey_id,
                status = status.as_u16(),
                error = %err,
                "Start request refused"
            );
            return Err(err);
        }

        tracing::info!(survey_id = %survey_id, "Slot reserved");
        Ok(())
    }

    async fn complete(&self, survey_id: SurveyId) -> SessionResult<CompletionReceipt> {
        let response = self
            .client
            .post(self.url(&format!("/surveys/{survey_id}/complete")))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let err = match status {
                StatusCode::NOT_FOUND => SessionError::NotFound,
                StatusCode::CONFLICT | StatusCode::GONE | StatusCode::UNPROCESSABLE_ENTITY => {
                    SessionError::CompletionRejected(default_message(
                        message,
                        "Completion refused by server",
                    ))
                }
                _ => map_error_status(status, Some(message)),
            };
            tracing::warn!(
                survey_id = %survey_id,
                status = status.as_u16(),
                error = %err,
                "Completion refused"
            );
            return Err(err);
        }

        let envelope: DataEnvelope<CompleteResponseDto> = response.json().await?;
        let receipt = envelope.data.into_receipt();
        tracing::info!(
            survey_id = %survey_id,
            reward = receipt.reward_credited,
            "Completion accepted"
        );
        Ok(receipt)
    }
}

/// Map a non-success status to a domain error
pub(crate) fn map_error_status(status: StatusCode, message: Option<String>) -> SessionError {
    match status {
        StatusCode::NOT_FOUND => SessionError::NotFound,
        StatusCode::CONFLICT | StatusCode::GONE => SessionError::SlotUnavailable,
        s if s.is_server_error() => SessionError::Network(format!("Server error: {s}")),
        s => SessionError::Internal(default_message(
            message.unwrap_or_default(),
            &format!("Unexpected status: {s}"),
        )),
    }
}

fn default_message(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
