//! Domain Services
//!
//! Pure countdown and completion-gate math. Everything here is a function of
//! its arguments so the timer loop and the state machine can share it and
//! tests can drive it without a clock.

/// One countdown observation
#[derive(Debug, Clone, PartialEq)]
pub struct TimerTick {
    /// Whole seconds remaining, never negative
    pub remaining_seconds: i64,
    /// `MM:SS` display form of `remaining_seconds`
    pub formatted: String,
    /// Share of the time limit consumed, 0.0..=100.0
    pub percent_elapsed: f64,
    /// True exactly when `remaining_seconds` reached zero
    pub is_expired: bool,
}

/// Compute a tick from an absolute expiry
///
/// Remaining time is always re-derived from `expires_at_ms`, so a delayed or
/// coalesced tick self-corrects instead of drifting.
pub fn tick(now_ms: i64, expires_at_ms: i64, total_seconds: i64) -> TimerTick {
    let remaining_ms = (expires_at_ms - now_ms).max(0);
    // Ceiling: a session with 1ms left still displays 00:01
    let remaining_seconds = (remaining_ms + 999) / 1000;
    tick_from_remaining(remaining_seconds, total_seconds)
}

/// Compute a tick from already-known remaining seconds
pub fn tick_from_remaining(remaining_seconds: i64, total_seconds: i64) -> TimerTick {
    let remaining_seconds = remaining_seconds.max(0);
    let percent_elapsed = if total_seconds <= 0 {
        100.0
    } else {
        let elapsed = (total_seconds - remaining_seconds) as f64;
        (elapsed / total_seconds as f64 * 100.0).clamp(0.0, 100.0)
    };
    TimerTick {
        remaining_seconds,
        formatted: format_mm_ss(remaining_seconds),
        percent_elapsed,
        is_expired: remaining_seconds == 0,
    }
}

/// Format whole seconds as `MM:SS`
///
/// Minutes are not capped at 59, a 90-minute survey displays as `90:00`.
pub fn format_mm_ss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Millisecond-precision elapsed percentage since `started_at_ms`
///
/// Used for the completion gate, where second-granularity rounding could
/// flip a boundary decision.
pub fn percent_elapsed(started_at_ms: i64, now_ms: i64, total_seconds: i64) -> f64 {
    if total_seconds <= 0 {
        return 100.0;
    }
    let elapsed_ms = (now_ms - started_at_ms).max(0) as f64;
    let total_ms = (total_seconds * 1000) as f64;
    (elapsed_ms / total_ms * 100.0).clamp(0.0, 100.0)
}

/// Check the minimum-time completion gate, boundary inclusive
pub fn meets_completion_gate(percent_elapsed: f64, min_percent_required: f64) -> bool {
    percent_elapsed >= min_percent_required
}
