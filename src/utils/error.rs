//! Error Handling
//!
//! Unified error types for the application layer, extending the core and
//! platform error sets with roster and delivery failures.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Roster loading errors (sheet unreachable, export malformed)
    #[error("Roster error: {0}")]
    Roster(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Platform adapter errors
    #[error("Platform error: {0}")]
    Platform(#[from] outreach_pulse_platforms::PlatformError),

    /// Core errors
    #[error(transparent)]
    Core(#[from] outreach_pulse_core::CoreError),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Webhook delivery rejected by the receiver
    #[error("Webhook delivery failed with status {status}: {body}")]
    Webhook { status: u16, body: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a roster error
    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
