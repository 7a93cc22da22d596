//! Unit tests for the survey crate

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use kernel::id::SurveyId;

use account::models::UserProfile;
use account::{AccountError, AccountResult, UserContext};

use crate::domain::entities::{CompletionReceipt, Survey};
use crate::domain::repository::SurveyCatalog;
use crate::error::{SessionError, SessionResult};

// ============================================================================
// Test doubles
// ============================================================================

fn sample_survey(duration_minutes: u32, slots_remaining: u32) -> Survey {
    Survey {
        id: SurveyId::new(),
        title: "Consumer habits 2026".to_string(),
        topic: "Retail".to_string(),
        description: Some("Short questionnaire about shopping habits".to_string()),
        duration_minutes,
        reward: 2.50,
        slots_total: 100,
        slots_remaining,
        external_url: "https://forms.example/abc".to_string(),
        is_active: true,
        attachments: vec![],
    }
}

fn at_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

#[derive(Default)]
struct MockCatalog {
    surveys: Vec<Survey>,
    start_error: Mutex<Option<SessionError>>,
    complete_error: Mutex<Option<SessionError>>,
    fetch_calls: AtomicUsize,
    start_calls: AtomicUsize,
    complete_calls: AtomicUsize,
}

impl MockCatalog {
    fn with_survey(survey: Survey) -> Self {
        Self {
            surveys: vec![survey],
            ..Default::default()
        }
    }

    fn fail_start(self, err: SessionError) -> Self {
        *self.start_error.lock().unwrap() = Some(err);
        self
    }

    fn fail_complete(self, err: SessionError) -> Self {
        *self.complete_error.lock().unwrap() = Some(err);
        self
    }
}

impl SurveyCatalog for MockCatalog {
    async fn list_public(&self) -> SessionResult<Vec<Survey>> {
        Ok(self.surveys.clone())
    }

    async fn fetch(&self, survey_id: SurveyId) -> SessionResult<Option<Survey>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.surveys.iter().find(|s| s.id == survey_id).cloned())
    }

    async fn start(&self, _survey_id: SurveyId) -> SessionResult<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        match self.start_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn complete(&self, _survey_id: SurveyId) -> SessionResult<CompletionReceipt> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        match self.complete_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(CompletionReceipt {
                reward_credited: 2.50,
                pending_balance: Some(2.50),
            }),
        }
    }
}

#[derive(Default)]
struct MockUser {
    credited: Mutex<Vec<f64>>,
    fail_credit: bool,
}

impl UserContext for MockUser {
    async fn current_user(&self) -> AccountResult<UserProfile> {
        let mut user = UserProfile::new("tester@insightpay.test", "Tester");
        user.verify_email()?;
        user.submit_application(Utc::now())?;
        user.approve(Utc::now())?;
        Ok(user)
    }

    async fn credit_reward(&self, amount: f64) -> AccountResult<()> {
        if self.fail_credit {
            return Err(AccountError::Internal("profile store offline".to_string()));
        }
        self.credited.lock().unwrap().push(amount);
        Ok(())
    }
}

// ============================================================================
// Countdown math
// ============================================================================

mod timer_math_tests {
    use crate::domain::services::*;

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(59), "00:59");
        assert_eq!(format_mm_ss(60), "01:00");
        assert_eq!(format_mm_ss(605), "10:05");
        // Minutes are not capped at 59
        assert_eq!(format_mm_ss(5400), "90:00");
        assert_eq!(format_mm_ss(-5), "00:00");
    }

    #[test]
    fn test_tick_rounds_partial_seconds_up() {
        // 1ms left still displays as one second
        let t = tick(0, 1, 600);
        assert_eq!(t.remaining_seconds, 1);
        assert!(!t.is_expired);

        let t = tick(0, 1000, 600);
        assert_eq!(t.remaining_seconds, 1);

        let t = tick(0, 1001, 600);
        assert_eq!(t.remaining_seconds, 2);
    }

    #[test]
    fn test_tick_expiry_edge() {
        let t = tick(600_000, 600_000, 600);
        assert!(t.is_expired);
        assert_eq!(t.remaining_seconds, 0);
        assert_eq!(t.formatted, "00:00");
        assert_eq!(t.percent_elapsed, 100.0);

        // Past the deadline never goes negative
        let t = tick(700_000, 600_000, 600);
        assert_eq!(t.remaining_seconds, 0);
        assert!(t.is_expired);
    }

    #[test]
    fn test_tick_percent_elapsed() {
        let t = tick(0, 600_000, 600);
        assert_eq!(t.percent_elapsed, 0.0);

        let t = tick(120_000, 600_000, 600);
        assert_eq!(t.percent_elapsed, 20.0);

        let t = tick(300_000, 600_000, 600);
        assert_eq!(t.percent_elapsed, 50.0);
    }

    #[test]
    fn test_tick_zero_duration() {
        let t = tick(0, 0, 0);
        assert!(t.is_expired);
        assert_eq!(t.percent_elapsed, 100.0);
    }

    #[test]
    fn test_percent_elapsed_ms_precision() {
        // 119.999s of a 600s limit is still below 20%
        assert!(percent_elapsed(0, 119_999, 600) < 20.0);
        assert_eq!(percent_elapsed(0, 120_000, 600), 20.0);
        assert!(percent_elapsed(0, 120_001, 600) > 20.0);
    }

    #[test]
    fn test_percent_elapsed_clamped() {
        assert_eq!(percent_elapsed(0, -5_000, 600), 0.0);
        assert_eq!(percent_elapsed(0, 10_000_000, 600), 100.0);
    }

    #[test]
    fn test_completion_gate_boundary_inclusive() {
        assert!(!meets_completion_gate(19.999, 20.0));
        assert!(meets_completion_gate(20.0, 20.0));
        assert!(meets_completion_gate(100.0, 20.0));
    }
}

// ============================================================================
// Session state machine
// ============================================================================

mod session_tests {
    use super::*;
    use crate::application::config::SessionConfig;
    use crate::application::session::SurveySession;
    use crate::domain::value_objects::SessionState;
    use std::sync::Arc;

    fn session_with(
        catalog: MockCatalog,
        user: MockUser,
    ) -> (
        SurveySession<MockCatalog, MockUser>,
        Arc<MockCatalog>,
        Arc<MockUser>,
    ) {
        let catalog = Arc::new(catalog);
        let user = Arc::new(user);
        let session = SurveySession::new(
            catalog.clone(),
            user.clone(),
            Arc::new(SessionConfig::default()),
        );
        (session, catalog, user)
    }

    #[tokio::test]
    async fn test_happy_path() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, catalog, user) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        assert_eq!(session.state(), SessionState::Idle);

        session.fetch_survey(survey_id).await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.survey().unwrap().id, survey_id);

        session.start_survey(at_ms(1_000_000)).await.unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.started_at_ms(), Some(1_000_000));
        // 10 minutes after start
        assert_eq!(session.expires_at_ms(), Some(1_600_000));

        // 50% elapsed
        session.complete_survey(at_ms(1_300_000)).await.unwrap();
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.reward_credited(), Some(2.50));
        assert_eq!(catalog.complete_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*user.credited.lock().unwrap(), vec![2.50]);
    }

    #[tokio::test]
    async fn test_fetch_unknown_survey() {
        let (mut session, _, _) =
            session_with(MockCatalog::with_survey(sample_survey(10, 5)), MockUser::default());

        let err = session.fetch_survey(SurveyId::new()).await.unwrap_err();
        assert_eq!(err, SessionError::NotFound);
        assert_eq!(session.state(), SessionState::Error);
        assert_eq!(session.last_error(), Some(&SessionError::NotFound));
    }

    #[tokio::test]
    async fn test_retry_from_error() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, catalog, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(SurveyId::new()).await.unwrap_err();
        assert_eq!(session.state(), SessionState::Error);

        session.fetch_survey(survey_id).await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.last_error().is_none());
        assert_eq!(catalog.fetch_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_ignored_outside_idle_and_error() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, catalog, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();

        // In progress: a stray fetch must not reset the session
        session.fetch_survey(survey_id).await.unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(catalog.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slot_unavailable_stays_ready() {
        let survey = sample_survey(10, 1);
        let survey_id = survey.id;
        let catalog =
            MockCatalog::with_survey(survey).fail_start(SessionError::SlotUnavailable);
        let (mut session, catalog, _) = session_with(catalog, MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        let err = session.start_survey(at_ms(0)).await.unwrap_err();
        assert_eq!(err, SessionError::SlotUnavailable);

        // Not started: no countdown fields, survey still loaded
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.started_at_ms().is_none());
        assert!(session.expires_at_ms().is_none());

        // Retry succeeds (mock error is one-shot)
        session.start_survey(at_ms(5_000)).await.unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(catalog.start_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_network_failure_on_start_stays_ready() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let catalog = MockCatalog::with_survey(survey)
            .fail_start(SessionError::Network("timeout".to_string()));
        let (mut session, _, _) = session_with(catalog, MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        let err = session.start_survey(at_ms(0)).await.unwrap_err();
        assert!(matches!(err, SessionError::Network(_)));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_start_ignored_when_not_ready() {
        let (mut session, catalog, _) =
            session_with(MockCatalog::with_survey(sample_survey(10, 5)), MockUser::default());

        // Idle: nothing loaded, nothing sent
        session.start_survey(at_ms(0)).await.unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(catalog.start_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_premature_completion_blocked_locally() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, catalog, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();

        // 19.9998% elapsed of a 10 minute limit
        let err = session.complete_survey(at_ms(119_999)).await.unwrap_err();
        assert!(matches!(err, SessionError::PrematureCompletion { .. }));

        // No request was sent and the session is still running
        assert_eq!(catalog.complete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_completion_allowed_at_exact_boundary() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, _, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();

        // Exactly 20%
        session.complete_survey(at_ms(120_000)).await.unwrap();
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[tokio::test]
    async fn test_completion_rejected_keeps_countdown_fields() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let catalog = MockCatalog::with_survey(survey)
            .fail_complete(SessionError::CompletionRejected("already completed".to_string()));
        let (mut session, _, _) = session_with(catalog, MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();

        let err = session.complete_survey(at_ms(300_000)).await.unwrap_err();
        assert!(matches!(err, SessionError::CompletionRejected(_)));
        assert_eq!(session.state(), SessionState::Error);

        // Countdown context survives for display
        assert_eq!(session.started_at_ms(), Some(0));
        assert_eq!(session.expires_at_ms(), Some(600_000));
        assert!(session.reward_credited().is_none());
    }

    #[tokio::test]
    async fn test_expiry_only_from_in_progress() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, _, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        // Ready: expiry event is stale
        session.fetch_survey(survey_id).await.unwrap();
        session.on_timer_expired(at_ms(0));
        assert_eq!(session.state(), SessionState::Ready);

        session.start_survey(at_ms(0)).await.unwrap();
        session.on_timer_expired(at_ms(600_000));
        assert_eq!(session.state(), SessionState::Expired);
        assert_eq!(session.expired_at_ms(), Some(600_000));
    }

    #[tokio::test]
    async fn test_stale_expiry_after_completion_ignored() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, _, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();
        session.complete_survey(at_ms(590_000)).await.unwrap();

        // The timer fires moments later; the accepted completion stands
        session.on_timer_expired(at_ms(600_000));
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.expired_at_ms().is_none());
    }

    #[tokio::test]
    async fn test_complete_ignored_after_expiry() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, catalog, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();
        session.on_timer_expired(at_ms(600_000));

        // A completion click racing the expiry does nothing
        session.complete_survey(at_ms(600_001)).await.unwrap();
        assert_eq!(session.state(), SessionState::Expired);
        assert_eq!(catalog.complete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reward_reconciliation_failure_does_not_revert_completion() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let user = MockUser {
            fail_credit: true,
            ..Default::default()
        };
        let (mut session, _, user) =
            session_with(MockCatalog::with_survey(survey), user);

        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();
        session.complete_survey(at_ms(300_000)).await.unwrap();

        // Server accepted; the local profile hiccup is display-only
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.reward_credited(), Some(2.50));
        assert!(user.credited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_can_complete_tracks_gate() {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let (mut session, _, _) =
            session_with(MockCatalog::with_survey(survey), MockUser::default());

        session.fetch_survey(survey_id).await.unwrap();
        assert!(!session.can_complete(at_ms(0)));

        session.start_survey(at_ms(0)).await.unwrap();
        assert!(!session.can_complete(at_ms(60_000)));
        assert!(session.can_complete(at_ms(120_000)));
        assert!(session.can_complete(at_ms(599_000)));
    }
}

// ============================================================================
// Countdown task
// ============================================================================

mod timer_tests {
    use super::*;
    use crate::application::timer::{SessionTimer, TimerEvent};
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_and_expires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = SessionTimer::spawn(0, 3_000, 3, tx);

        let mut ticks = Vec::new();
        let mut expired_events = 0;
        while let Some(event) = rx.recv().await {
            match event {
                TimerEvent::Tick(t) => ticks.push(t),
                TimerEvent::Expired => expired_events += 1,
            }
        }

        assert_eq!(expired_events, 1);
        // Immediate tick at 3s, then 2, 1, 0
        let seconds: Vec<i64> = ticks.iter().map(|t| t.remaining_seconds).collect();
        assert_eq!(seconds, vec![3, 2, 1, 0]);
        assert_eq!(ticks.first().unwrap().formatted, "00:03");
        assert!(ticks.last().unwrap().is_expired);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_expired_deadline() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = SessionTimer::spawn(10_000, 5_000, 600, tx);

        // First and only tick reports expiry immediately
        let first = rx.recv().await.unwrap();
        match first {
            TimerEvent::Tick(t) => {
                assert_eq!(t.remaining_seconds, 0);
                assert!(t.is_expired);
            }
            other => panic!("expected tick, got {other:?}"),
        }
        assert_eq!(rx.recv().await, Some(TimerEvent::Expired));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = SessionTimer::spawn(0, 600_000, 600, tx);

        // Let the immediate tick arrive, then cancel
        let first = rx.recv().await.unwrap();
        assert!(matches!(first, TimerEvent::Tick(_)));
        handle.cancel();

        // Aborted task drops the sender without emitting Expired
        let mut saw_expired = false;
        while let Some(event) = rx.recv().await {
            if event == TimerEvent::Expired {
                saw_expired = true;
            }
        }
        assert!(!saw_expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let _handle = SessionTimer::spawn(0, 600_000, 600, tx);
            let first = rx.recv().await.unwrap();
            assert!(matches!(first, TimerEvent::Tick(_)));
        }

        // Handle dropped: channel closes without the countdown finishing
        let mut saw_expired = false;
        while let Some(event) = rx.recv().await {
            if event == TimerEvent::Expired {
                saw_expired = true;
            }
        }
        assert!(!saw_expired);
    }
}

// ============================================================================
// View projection
// ============================================================================

mod view_tests {
    use super::*;
    use crate::application::config::SessionConfig;
    use crate::application::session::SurveySession;
    use crate::domain::services::tick;
    use crate::domain::value_objects::SessionState;
    use crate::presentation::view::{RecoveryAction, project};
    use std::sync::Arc;

    async fn in_progress_session() -> SurveySession<MockCatalog, MockUser> {
        let survey = sample_survey(10, 5);
        let survey_id = survey.id;
        let mut session = SurveySession::new(
            Arc::new(MockCatalog::with_survey(survey)),
            Arc::new(MockUser::default()),
            Arc::new(SessionConfig::default()),
        );
        session.fetch_survey(survey_id).await.unwrap();
        session.start_survey(at_ms(0)).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_in_progress_view() {
        let session = in_progress_session().await;
        let t = tick(180_000, 600_000, 600);
        let view = project(&session, Some(&t), at_ms(180_000));

        assert_eq!(view.state, SessionState::InProgress);
        assert_eq!(view.title.as_deref(), Some("Consumer habits 2026"));
        assert_eq!(view.formatted_time.as_deref(), Some("07:00"));
        assert_eq!(view.remaining_seconds, Some(420));
        assert_eq!(view.percent_elapsed, 30.0);
        assert!(view.can_complete);
        assert_eq!(view.percent_until_enabled, 0.0);
        assert!(view.recovery.is_none());
        assert!(view.redirect_in_seconds.is_none());
    }

    #[tokio::test]
    async fn test_gate_progress_shown_before_threshold() {
        let session = in_progress_session().await;
        let t = tick(60_000, 600_000, 600);
        let view = project(&session, Some(&t), at_ms(60_000));

        assert!(!view.can_complete);
        assert_eq!(view.percent_until_enabled, 10.0);
    }

    #[tokio::test]
    async fn test_view_recomputes_countdown_without_tick() {
        let session = in_progress_session().await;
        let view = project(&session, None, at_ms(300_000));

        assert_eq!(view.formatted_time.as_deref(), Some("05:00"));
        assert_eq!(view.remaining_seconds, Some(300));
    }

    #[tokio::test]
    async fn test_expired_view_redirect_countdown() {
        let mut session = in_progress_session().await;
        session.on_timer_expired(at_ms(600_000));

        let view = project(&session, None, at_ms(600_000));
        assert_eq!(view.state, SessionState::Expired);
        assert_eq!(view.formatted_time.as_deref(), Some("00:00"));
        assert_eq!(view.remaining_seconds, Some(0));
        assert_eq!(view.redirect_in_seconds, Some(5));
        assert_eq!(view.recovery, Some(RecoveryAction::BackToSurveys));

        let view = project(&session, None, at_ms(602_000));
        assert_eq!(view.redirect_in_seconds, Some(3));

        // Redirect moment
        let view = project(&session, None, at_ms(605_000));
        assert_eq!(view.redirect_in_seconds, Some(0));
    }

    #[tokio::test]
    async fn test_error_view_recovery_actions() {
        let survey = sample_survey(10, 5);
        let mut session = SurveySession::new(
            Arc::new(MockCatalog::with_survey(survey)),
            Arc::new(MockUser::default()),
            Arc::new(SessionConfig::default()),
        );

        // NotFound is not retryable as-is
        session.fetch_survey(SurveyId::new()).await.unwrap_err();
        let view = project(&session, None, at_ms(0));
        assert_eq!(view.state, SessionState::Error);
        assert_eq!(view.recovery, Some(RecoveryAction::BackToSurveys));
        assert_eq!(view.error_message.as_deref(), Some("Survey not found"));
    }

    #[tokio::test]
    async fn test_completed_view() {
        let mut session = in_progress_session().await;
        session.complete_survey(at_ms(300_000)).await.unwrap();

        let view = project(&session, None, at_ms(300_000));
        assert_eq!(view.state, SessionState::Completed);
        assert_eq!(view.reward_credited, Some(2.50));
        assert!(view.formatted_time.is_none());
        assert_eq!(view.recovery, Some(RecoveryAction::BackToSurveys));
    }
}

// ============================================================================
// Errors and wire shapes
// ============================================================================

mod error_tests {
    use crate::error::SessionError;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SessionError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            SessionError::Network("x".into()).kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(SessionError::SlotUnavailable.kind(), ErrorKind::Conflict);
        assert_eq!(
            SessionError::PrematureCompletion {
                percent_elapsed: 10.0,
                required: 20.0
            }
            .kind(),
            ErrorKind::UnprocessableEntity
        );
        assert_eq!(
            SessionError::CompletionRejected("x".into()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(SessionError::Expired.kind(), ErrorKind::Gone);
    }

    #[test]
    fn test_recoverability() {
        assert!(SessionError::Network("timeout".into()).is_recoverable());
        assert!(SessionError::SlotUnavailable.is_recoverable());
        assert!(!SessionError::NotFound.is_recoverable());
        assert!(!SessionError::Expired.is_recoverable());
        assert!(
            !SessionError::PrematureCompletion {
                percent_elapsed: 10.0,
                required: 20.0
            }
            .is_recoverable()
        );
    }
}

mod http_mapping_tests {
    use crate::error::SessionError;
    use crate::infra::http::map_error_status;
    use reqwest::StatusCode;

    #[test]
    fn test_start_status_mapping() {
        assert_eq!(
            map_error_status(StatusCode::NOT_FOUND, None),
            SessionError::NotFound
        );
        assert_eq!(
            map_error_status(StatusCode::CONFLICT, None),
            SessionError::SlotUnavailable
        );
        assert_eq!(
            map_error_status(StatusCode::GONE, None),
            SessionError::SlotUnavailable
        );
    }

    #[test]
    fn test_server_errors_map_to_network() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert!(matches!(
                map_error_status(status, None),
                SessionError::Network(_)
            ));
        }
    }

    #[test]
    fn test_unexpected_status_is_internal() {
        assert!(matches!(
            map_error_status(StatusCode::IM_A_TEAPOT, Some("teapot".to_string())),
            SessionError::Internal(_)
        ));
    }
}

mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_survey_dto_from_wire() {
        let json = r#"{
            "data": [{
                "id": "7f1c2a9e-8a7b-4f0e-9a46-2f9a1b6f3c11",
                "title": "Consumer habits 2026",
                "topic": "Retail",
                "durationMinutes": 10,
                "reward": 2.5,
                "slotsTotal": 100,
                "slotsRemaining": 42,
                "externalUrl": "https://forms.example/abc",
                "isActive": true,
                "attachments": [{
                    "id": "3d0a7d1c-5b2e-4c8f-b7aa-0e4d9c21f604",
                    "displayName": "brief.pdf",
                    "mimeType": "application/pdf",
                    "byteSize": 20480,
                    "fetchUrl": "https://files.example/brief.pdf"
                }]
            }]
        }"#;

        let envelope: DataEnvelope<Vec<SurveyDto>> = serde_json::from_str(json).unwrap();
        let survey = envelope.data.into_iter().next().unwrap().into_survey().unwrap();
        assert_eq!(survey.duration_minutes, 10);
        assert_eq!(survey.total_seconds(), 600);
        assert_eq!(survey.slots_remaining, 42);
        assert!(survey.is_startable());
        assert_eq!(survey.attachments.len(), 1);
        assert_eq!(survey.attachments[0].display_name, "brief.pdf");
    }

    #[test]
    fn test_survey_dto_invalid_id() {
        let dto = SurveyDto {
            id: "not-a-uuid".to_string(),
            title: "t".to_string(),
            topic: "t".to_string(),
            description: None,
            duration_minutes: 5,
            reward: 1.0,
            slots_total: 1,
            slots_remaining: 1,
            external_url: "https://x".to_string(),
            is_active: true,
            attachments: vec![],
        };
        assert!(dto.into_survey().is_err());
    }

    #[test]
    fn test_complete_response_pending_balance_optional() {
        let json = r#"{"rewardCredited": 2.5}"#;
        let dto: CompleteResponseDto = serde_json::from_str(json).unwrap();
        let receipt = dto.into_receipt();
        assert_eq!(receipt.reward_credited, 2.5);
        assert!(receipt.pending_balance.is_none());
    }
}
