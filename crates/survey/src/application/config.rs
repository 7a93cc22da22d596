//! Application Configuration
//!
//! Configuration for the survey session layer.

use std::time::Duration;

/// Survey session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum share of the time limit that must elapse before completion
    pub min_percent_required: f64,
    /// Countdown tick cadence
    pub tick_interval: Duration,
    /// Delay before an expired session redirects back to the listing
    pub redirect_delay: Duration,
    /// Backend base URL, no trailing slash
    pub api_base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_percent_required: 20.0,
            tick_interval: Duration::from_secs(1),
            redirect_delay: Duration::from_secs(5),
            api_base_url: "https://api.insightpay.example".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SessionConfig {
    /// Create config for development (local backend)
    pub fn development() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            ..Default::default()
        }
    }

    pub fn redirect_delay_ms(&self) -> i64 {
        self.redirect_delay.as_millis() as i64
    }

    pub fn tick_interval_ms(&self) -> i64 {
        self.tick_interval.as_millis() as i64
    }
}
