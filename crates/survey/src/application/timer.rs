//! Session Countdown Timer
//!
//! A 1 Hz countdown driven by an absolute expiry. The task recomputes
//! remaining time from the deadline on every tick, so scheduling delay never
//! accumulates into drift. Expiry is edge-triggered: exactly one `Expired`
//! event, then the task ends.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::services::{TimerTick, tick_from_remaining};

/// Events emitted by the countdown task
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Periodic countdown observation
    Tick(TimerTick),
    /// Time limit reached, emitted exactly once
    Expired,
}

/// Handle to a running countdown task
///
/// Dropping the handle cancels the task, so an abandoned session can never
/// leave a timer running.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Stop the countdown without waiting for expiry
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Check whether the task has ended (expired or cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Session countdown timer
pub struct SessionTimer;

impl SessionTimer {
    /// Spawn a countdown toward `expires_at_ms`
    ///
    /// `now_ms` anchors the wall-clock expiry onto the runtime clock; after
    /// that the task only consults its own deadline. Emits an immediate first
    /// tick, then one per second, then a single `TimerEvent::Expired`.
    pub fn spawn(
        now_ms: i64,
        expires_at_ms: i64,
        total_seconds: i64,
        tx: UnboundedSender<TimerEvent>,
    ) -> TimerHandle {
        let remaining_ms = (expires_at_ms - now_ms).max(0) as u64;
        let deadline = Instant::now() + Duration::from_millis(remaining_ms);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                let remaining = deadline.saturating_duration_since(Instant::now());
                let remaining_ms = remaining.as_millis() as i64;
                let remaining_seconds = (remaining_ms + 999) / 1000;
                let tick = tick_from_remaining(remaining_seconds, total_seconds);
                let expired = tick.is_expired;

                if tx.send(TimerEvent::Tick(tick)).is_err() {
                    // Receiver gone, nobody is displaying this countdown
                    break;
                }

                if expired {
                    let _ = tx.send(TimerEvent::Expired);
                    tracing::debug!(total_seconds, "Countdown reached zero");
                    break;
                }
            }
        });

        TimerHandle { task }
    }
}
