//! Upstream Call Outcomes
//!
//! A single upstream call resolves to a tagged [`Outcome`] so that "no data
//! for this filter", "rate limited", and "real error" are distinguished by
//! the type system instead of by inspecting status codes at every call
//! site. Transport-level failures (connect, timeout) stay on the error
//! channel as [`PlatformError::Transport`].

use serde_json::Value;
use thiserror::Error;

/// Classified result of one upstream metrics call.
///
/// The client performing the call never retries; the retry policy layered
/// on top decides what to do with each variant.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 2xx with a JSON body.
    Success(Value),
    /// Upstream reports no matching data for this partition (400/404 on a
    /// filtered query). Not an error.
    EmptyFiltered,
    /// 429.
    RateLimited,
    /// 5xx.
    ServerError(u16),
    /// Any other non-success status, with the response body for diagnosis.
    ClientError(u16, String),
}

impl Outcome {
    /// Classify a metrics-query response by status. `body` is the raw text;
    /// on 2xx it must parse as JSON.
    pub fn from_response(status: u16, body: String) -> PlatformResult<Outcome> {
        match status {
            200..=299 => {
                let json = serde_json::from_str(&body).map_err(|e| {
                    PlatformError::Contract(format!("invalid JSON in {status} response: {e}"))
                })?;
                Ok(Outcome::Success(json))
            }
            400 | 404 => Ok(Outcome::EmptyFiltered),
            429 => Ok(Outcome::RateLimited),
            500..=599 => Ok(Outcome::ServerError(status)),
            other => Ok(Outcome::ClientError(other, body)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Error type for the platform adapter layer.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Network-level failure (connect, timeout, TLS). Transient.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream returned a non-success status on a call with no
    /// empty-filter semantics (identity lookup, campaign listing).
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Upstream responded successfully but not in the documented shape.
    #[error("contract violation: {0}")]
    Contract(String),
}

/// Result type alias for platform adapter errors
pub type PlatformResult<T> = Result<T, PlatformError>;

impl PlatformError {
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Whether the retry policy may re-attempt after this error.
    /// Transport failures always qualify; upstream statuses qualify for
    /// 429, and for 5xx only when the caller opted in.
    pub fn is_retryable(&self, retry_server_errors: bool) -> bool {
        match self {
            PlatformError::Transport(_) => true,
            PlatformError::Upstream { status: 429, .. } => true,
            PlatformError::Upstream { status, .. } => {
                retry_server_errors && (500..=599).contains(status)
            }
            PlatformError::Contract(_) => false,
        }
    }
}
