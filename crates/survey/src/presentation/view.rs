//! View Projection
//!
//! Flattens the session state machine plus the latest timer tick into a
//! display-ready snapshot. The projection is read-only: it never advances
//! the state machine.

use chrono::{DateTime, Utc};

use account::UserContext;

use crate::application::session::SurveySession;
use crate::domain::repository::SurveyCatalog;
use crate::domain::services::{TimerTick, format_mm_ss, tick};
use crate::domain::value_objects::SessionState;

/// What the user should be offered after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// The same operation can be retried as-is
    Retry,
    /// Return to the survey listing
    BackToSurveys,
}

/// Display-ready snapshot of one session
#[derive(Debug, Clone)]
pub struct SessionView {
    pub state: SessionState,
    pub title: Option<String>,
    pub reward: Option<f64>,
    /// `MM:SS`, present while a countdown is meaningful
    pub formatted_time: Option<String>,
    pub remaining_seconds: Option<i64>,
    pub percent_elapsed: f64,
    /// True when completion may be submitted right now
    pub can_complete: bool,
    /// How much more of the time limit must pass before the gate opens
    pub percent_until_enabled: f64,
    pub reward_credited: Option<f64>,
    pub error_message: Option<String>,
    pub recovery: Option<RecoveryAction>,
    /// Seconds until the expired view redirects to the listing
    pub redirect_in_seconds: Option<i64>,
}

/// Project a session (and the latest tick, if any) into a view
pub fn project<C, U>(
    session: &SurveySession<C, U>,
    latest_tick: Option<&TimerTick>,
    now: DateTime<Utc>,
) -> SessionView
where
    C: SurveyCatalog,
    U: UserContext,
{
    let state = session.state();
    let now_ms = now.timestamp_millis();

    // Prefer the timer's observation; fall back to recomputing from the
    // absolute expiry when no tick has arrived yet
    let countdown = match (latest_tick, session.expires_at_ms(), session.survey()) {
        (Some(t), _, _) if state.has_active_timer() => Some(t.clone()),
        (None, Some(expires), Some(survey)) if state.has_active_timer() => {
            Some(tick(now_ms, expires, survey.total_seconds()))
        }
        _ => None,
    };

    let percent_elapsed = session.percent_elapsed(now);
    let min_required = session.config().min_percent_required;
    let can_complete = session.can_complete(now);
    let percent_until_enabled = if state == SessionState::InProgress {
        (min_required - percent_elapsed).max(0.0)
    } else {
        0.0
    };

    let recovery = match state {
        SessionState::Error => Some(match session.last_error() {
            Some(err) if err.is_recoverable() => RecoveryAction::Retry,
            _ => RecoveryAction::BackToSurveys,
        }),
        SessionState::Expired | SessionState::Completed => Some(RecoveryAction::BackToSurveys),
        _ => None,
    };

    let redirect_in_seconds = match (state, session.expired_at_ms()) {
        (SessionState::Expired, Some(expired_at)) => {
            let deadline = expired_at + session.config().redirect_delay_ms();
            let remaining_ms = (deadline - now_ms).max(0);
            Some((remaining_ms + 999) / 1000)
        }
        _ => None,
    };

    SessionView {
        state,
        title: session.survey().map(|s| s.title.clone()),
        reward: session.survey().map(|s| s.reward),
        formatted_time: match state {
            SessionState::Expired => Some(format_mm_ss(0)),
            _ => countdown.as_ref().map(|t| t.formatted.clone()),
        },
        remaining_seconds: match state {
            SessionState::Expired => Some(0),
            _ => countdown.as_ref().map(|t| t.remaining_seconds),
        },
        percent_elapsed,
        can_complete,
        percent_until_enabled,
        reward_credited: session.reward_credited(),
        error_message: session.last_error().map(|e| e.to_string()),
        recovery,
        redirect_in_seconds,
    }
}
