//! Retry Policy
//!
//! Bounded exponential backoff around single upstream calls. Only
//! transient failures are retried: rate limiting always, transport errors
//! always, server errors only where the caller opts in (the identity
//! lookup path does, the partition fetch path does not — a partition-level
//! 5xx is more often a permanent per-filter condition upstream, and
//! retrying it would multiply fan-out latency by the whole backoff
//! schedule).
//!
//! A small fixed pacing delay runs before every attempt, independent of
//! backoff, to smooth burst rate against the upstream quota (~10 req/s
//! sustained).

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::outcome::{Outcome, PlatformError, PlatformResult};

/// Retry configuration for one class of upstream call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff base; attempt `n` waits `base * 2^(n-1)` before retrying.
    pub base_delay: Duration,
    /// Fixed sleep applied before every attempt.
    pub pacing: Duration,
    /// Whether 5xx responses count as transient.
    pub retry_server_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            pacing: Duration::from_millis(100),
            retry_server_errors: false,
        }
    }
}

impl RetryPolicy {
    /// Policy for identity lookups: 5xx is retried as well as 429.
    pub fn for_identity() -> Self {
        Self {
            retry_server_errors: true,
            ..Self::default()
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Run a fallible operation with retry. Retries only on errors for
    /// which [`PlatformError::is_retryable`] holds; attempts exhausted
    /// propagate the last error.
    pub async fn call<T, F, Fut>(&self, op: F) -> PlatformResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = PlatformResult<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            tokio::time::sleep(self.pacing).await;

            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable(self.retry_server_errors) && attempt < self.max_attempts => {
                    let delay = self.backoff(attempt);
                    debug!(attempt, ?delay, %err, "transient upstream failure, backing off");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Run an outcome-producing operation with retry. `RateLimited` (and
    /// `ServerError` when opted in) outcomes are retried like transient
    /// errors; once attempts are exhausted the last outcome is returned
    /// as-is for the caller to classify.
    pub async fn call_outcome<F, Fut>(&self, op: F) -> PlatformResult<Outcome>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = PlatformResult<Outcome>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            tokio::time::sleep(self.pacing).await;

            let transient = match op().await {
                Ok(Outcome::RateLimited) => Ok(Outcome::RateLimited),
                Ok(Outcome::ServerError(status)) if self.retry_server_errors => {
                    Ok(Outcome::ServerError(status))
                }
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_retryable(self.retry_server_errors) => Err(err),
                Err(err) => return Err(err),
            };

            if attempt >= self.max_attempts {
                return transient;
            }
            let delay = self.backoff(attempt);
            debug!(attempt, ?delay, "transient outcome, backing off");
            tokio::time::sleep(delay).await;
        }
    }
}
