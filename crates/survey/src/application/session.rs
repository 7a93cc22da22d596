//! Survey Session State Machine
//!
//! Owns the lifecycle of one survey-taking attempt. Transitions only happen
//! through the methods here; operations arriving in the wrong state are
//! ignored, which makes races between the timer and in-flight requests safe
//! to deliver in any order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::SurveyId;

use account::UserContext;

use crate::application::config::SessionConfig;
use crate::domain::entities::Survey;
use crate::domain::repository::SurveyCatalog;
use crate::domain::services::{meets_completion_gate, percent_elapsed};
use crate::domain::value_objects::SessionState;
use crate::error::{SessionError, SessionResult};

/// Survey session state machine
pub struct SurveySession<C, U>
where
    C: SurveyCatalog,
    U: UserContext,
{
    catalog: Arc<C>,
    user_ctx: Arc<U>,
    config: Arc<SessionConfig>,
    state: SessionState,
    survey: Option<Survey>,
    /// Set once at start, never recomputed
    started_at_ms: Option<i64>,
    /// Absolute expiry, `started_at_ms + duration`
    expires_at_ms: Option<i64>,
    /// Set when the timer fired in `InProgress`
    expired_at_ms: Option<i64>,
    /// Server-confirmed reward after an accepted completion
    reward_credited: Option<f64>,
    last_error: Option<SessionError>,
}

impl<C, U> SurveySession<C, U>
where
    C: SurveyCatalog,
    U: UserContext,
{
    pub fn new(catalog: Arc<C>, user_ctx: Arc<U>, config: Arc<SessionConfig>) -> Self {
        Self {
            catalog,
            user_ctx,
            config,
            state: SessionState::Idle,
            survey: None,
            started_at_ms: None,
            expires_at_ms: None,
            expired_at_ms: None,
            reward_credited: None,
            last_error: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn survey(&self) -> Option<&Survey> {
        self.survey.as_ref()
    }

    pub fn started_at_ms(&self) -> Option<i64> {
        self.started_at_ms
    }

    pub fn expires_at_ms(&self) -> Option<i64> {
        self.expires_at_ms
    }

    pub fn expired_at_ms(&self) -> Option<i64> {
        self.expired_at_ms
    }

    pub fn reward_credited(&self) -> Option<f64> {
        self.reward_credited
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Elapsed share of the time limit at `now`, 0.0..=100.0
    ///
    /// Zero before the session has started.
    pub fn percent_elapsed(&self, now: DateTime<Utc>) -> f64 {
        match (self.started_at_ms, self.survey.as_ref()) {
            (Some(started), Some(survey)) => {
                percent_elapsed(started, now.timestamp_millis(), survey.total_seconds())
            }
            _ => 0.0,
        }
    }

    /// Check whether the minimum-time gate is open at `now`
    pub fn can_complete(&self, now: DateTime<Utc>) -> bool {
        self.state == SessionState::InProgress
            && meets_completion_gate(self.percent_elapsed(now), self.config.min_percent_required)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Load survey details: `Idle`/`Error` -> `Loading` -> `Ready`
    ///
    /// A call while already `Loading` is ignored so double-triggered fetches
    /// cannot race each other. From `Error` this is the retry path.
    pub async fn fetch_survey(&mut self, survey_id: SurveyId) -> SessionResult<()> {
        match self.state {
            SessionState::Idle | SessionState::Error => {}
            other => {
                tracing::debug!(state = %other, "fetch_survey ignored");
                return Ok(());
            }
        }

        self.state = SessionState::Loading;
        self.survey = None;
        self.last_error = None;

        match self.catalog.fetch(survey_id).await {
            Ok(Some(survey)) => {
                tracing::info!(
                    survey_id = %survey_id,
                    title = %survey.title,
                    slots_remaining = survey.slots_remaining,
                    "Survey loaded"
                );
                self.survey = Some(survey);
                self.state = SessionState::Ready;
                Ok(())
            }
            Ok(None) => Err(self.fail(SessionError::NotFound)),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Reserve a slot and begin the countdown: `Ready` -> `InProgress`
    ///
    /// The expiry is computed exactly once, from the start instant and the
    /// survey's time limit. A `SlotUnavailable` or network failure leaves the
    /// session in `Ready` so the caller can retry or go back to the listing.
    pub async fn start_survey(&mut self, now: DateTime<Utc>) -> SessionResult<()> {
        if self.state != SessionState::Ready {
            tracing::debug!(state = %self.state, "start_survey ignored");
            return Ok(());
        }
        let (survey_id, total_seconds) = match self.survey.as_ref() {
            Some(s) => (s.id, s.total_seconds()),
            None => return Err(self.fail(SessionError::Internal("No survey loaded".into()))),
        };

        match self.catalog.start(survey_id).await {
            Ok(()) => {
                let started_at_ms = now.timestamp_millis();
                let expires_at_ms = started_at_ms + total_seconds * 1000;
                self.started_at_ms = Some(started_at_ms);
                self.expires_at_ms = Some(expires_at_ms);
                self.state = SessionState::InProgress;
                tracing::info!(
                    survey_id = %survey_id,
                    started_at_ms,
                    expires_at_ms,
                    "Survey session started"
                );
                Ok(())
            }
            Err(err @ SessionError::SlotUnavailable) => {
                // Stay Ready: the survey still exists, only this attempt lost
                err.log();
                Err(err)
            }
            Err(err @ SessionError::Network(_)) => {
                err.log();
                Err(err)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Submit completion: `InProgress` -> `Completing` -> `Completed`
    ///
    /// The minimum-time gate is checked locally first; a premature attempt
    /// never reaches the network and leaves the state untouched. A server
    /// rejection moves to `Error` but keeps the countdown fields, so the
    /// timer stays meaningful while the user decides what to do.
    pub async fn complete_survey(&mut self, now: DateTime<Utc>) -> SessionResult<()> {
        if self.state != SessionState::InProgress {
            tracing::debug!(state = %self.state, "complete_survey ignored");
            return Ok(());
        }
        let survey_id = match self.survey.as_ref() {
            Some(s) => s.id,
            None => return Err(self.fail(SessionError::Internal("No survey loaded".into()))),
        };

        let elapsed = self.percent_elapsed(now);
        if !meets_completion_gate(elapsed, self.config.min_percent_required) {
            let err = SessionError::PrematureCompletion {
                percent_elapsed: elapsed,
                required: self.config.min_percent_required,
            };
            err.log();
            return Err(err);
        }

        self.state = SessionState::Completing;

        match self.catalog.complete(survey_id).await {
            Ok(receipt) => {
                self.reward_credited = Some(receipt.reward_credited);
                self.state = SessionState::Completed;
                tracing::info!(
                    survey_id = %survey_id,
                    reward = receipt.reward_credited,
                    "Survey completed"
                );

                // Display-side reconciliation; the server already credited
                if let Err(err) = self.user_ctx.credit_reward(receipt.reward_credited).await {
                    tracing::warn!(
                        survey_id = %survey_id,
                        error = %err,
                        "Profile reward reconciliation failed"
                    );
                }
                Ok(())
            }
            Err(err) => Err(self.fail_keep_timer(err)),
        }
    }

    /// Timer expiry edge: `InProgress` -> `Expired`
    ///
    /// In any other state the event is stale and ignored. In particular a
    /// completion already in flight (`Completing`) is never force-expired;
    /// the server's verdict decides.
    pub fn on_timer_expired(&mut self, now: DateTime<Utc>) {
        if self.state != SessionState::InProgress {
            tracing::debug!(state = %self.state, "Expiry event ignored");
            return;
        }
        self.expired_at_ms = Some(now.timestamp_millis());
        self.state = SessionState::Expired;
        tracing::warn!(
            survey_id = self.survey.as_ref().map(|s| tracing::field::display(s.id)),
            "Survey session expired"
        );
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Record `err`, move to `Error`, clear countdown fields
    fn fail(&mut self, err: SessionError) -> SessionError {
        self.started_at_ms = None;
        self.expires_at_ms = None;
        self.fail_keep_timer(err)
    }

    /// Record `err` and move to `Error` without touching countdown fields
    fn fail_keep_timer(&mut self, err: SessionError) -> SessionError {
        err.log();
        self.last_error = Some(err.clone());
        self.state = SessionState::Error;
        err
    }
}
