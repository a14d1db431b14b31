//! Webhook Forwarding
//!
//! Forwards a single workspace summary verbatim to a caller-supplied
//! webhook URL. Fire-and-report: no delivery persistence and no retry —
//! the caller re-sends if it cares.

use std::time::Duration;

use tracing::{info, warn};

use crate::models::WorkspaceSummary;
use crate::utils::error::{AppError, AppResult};

/// Per-delivery timeout.
const WEBHOOK_TIMEOUT_SECS: u64 = 15;

/// Sends workspace summaries to external webhooks.
pub struct WebhookForwarder {
    client: reqwest::Client,
}

impl WebhookForwarder {
    pub fn new() -> Self {
        Self {
            client: outreach_pulse_platforms::build_http_client(Duration::from_secs(
                WEBHOOK_TIMEOUT_SECS,
            )),
        }
    }

    /// POST the summary as JSON. Non-2xx responses surface as an error
    /// carrying the status and body.
    pub async fn forward(&self, webhook_url: &str, summary: &WorkspaceSummary) -> AppResult<()> {
        if webhook_url.trim().is_empty() {
            return Err(AppError::validation("missing webhook_url"));
        }

        info!(workspace = %summary.identity.display_name, "forwarding summary to webhook");

        let response = self
            .client
            .post(webhook_url)
            .json(summary)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "webhook receiver rejected delivery");
            return Err(AppError::Webhook {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

impl Default for WebhookForwarder {
    fn default() -> Self {
        Self::new()
    }
}
