//! HTTP Client Factory
//!
//! Builds the reqwest clients the platform adapters share. Timeouts are
//! enforced per call, not per retry sequence, so every attempt gets the
//! full budget.

use std::time::Duration;

/// Default per-call timeout for metrics and roster queries.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shorter timeout for lightweight identity lookups.
pub const IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Build a `reqwest::Client` with the given per-request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent("outreach-pulse/0.1")
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
