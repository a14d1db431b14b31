//! Instantly Adapter
//!
//! Workspace analytics on Instantly come from the campaign overview
//! endpoint, which only answers for one campaign-status filter at a time.
//! The status filters are overlapping views of the same underlying totals,
//! so the workspace total per metric is the maximum observed across them —
//! the same derivation the Instantly dashboard uses. Reduction mode:
//! max-merge.
//!
//! Also exposes the identity lookup (`/workspaces/current`), the raw
//! workspace details call, and the paginated interested-reply listing used
//! by the lead-response tooling.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use outreach_pulse_core::{Credential, DateRange, Reduction, WorkspaceIdentity};

use crate::http_client::{build_http_client, DEFAULT_TIMEOUT_SECS, IDENTITY_TIMEOUT_SECS};
use crate::outcome::{Outcome, PlatformError, PlatformResult};
use crate::platform::{PartitionKey, Platform};

/// Campaign analytics overview endpoint.
const OVERVIEW_URL: &str = "https://api.instantly.ai/api/v2/campaigns/analytics/overview";

/// Current-workspace identity endpoint.
const WORKSPACE_URL: &str = "https://api.instantly.ai/api/v2/workspaces/current";

/// Unibox email listing endpoint.
const EMAILS_URL: &str = "https://api.instantly.ai/api/v2/emails";

/// Campaign statuses to scan. Together these cover every campaign state
/// the overview endpoint can filter on.
pub const CAMPAIGN_STATUSES: [i32; 8] = [0, 1, 2, 3, 4, -99, -1, -2];

/// Page size for the email listing.
const EMAIL_PAGE_LIMIT: usize = 100;

/// `ue_type` value marking an email as received (a reply from a lead).
/// The interested filter returns both sent and received emails in a
/// thread; only received ones are lead responses.
const UE_TYPE_RECEIVED: i64 = 2;

/// Identity response from `/workspaces/current`.
#[derive(Debug, Deserialize)]
struct WorkspaceCurrentResponse {
    id: Option<String>,
    name: Option<String>,
}

/// One email from the unibox listing. Schemaless fields we don't read are
/// dropped at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyEmail {
    #[serde(default)]
    pub ue_type: Option<i64>,
    #[serde(default)]
    pub from_address_email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<ReplyBody>,
    #[serde(default)]
    pub timestamp_email: Option<String>,
    #[serde(default, rename = "lead")]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyBody {
    #[serde(default)]
    pub text: Option<String>,
}

impl ReplyEmail {
    /// Whether this email is a reply received from a lead.
    pub fn is_received_reply(&self) -> bool {
        self.ue_type == Some(UE_TYPE_RECEIVED)
    }

    pub fn body_text(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.text.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct EmailsPage {
    #[serde(default)]
    items: Vec<ReplyEmail>,
    #[serde(default)]
    next_starting_after: Option<String>,
}

/// Instantly upstream adapter.
pub struct InstantlyPlatform {
    client: reqwest::Client,
    identity_client: reqwest::Client,
}

impl InstantlyPlatform {
    pub fn new() -> Self {
        Self {
            client: build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            identity_client: build_http_client(Duration::from_secs(IDENTITY_TIMEOUT_SECS)),
        }
    }

    /// Full workspace details JSON (plan ids, org domain, timestamps), for
    /// the workspace-info tooling. Shape is upstream-defined; returned
    /// verbatim.
    pub async fn workspace_details(&self, credential: &Credential) -> PlatformResult<Value> {
        let response = self
            .identity_client
            .get(WORKSPACE_URL)
            .bearer_auth(credential.token())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(PlatformError::upstream(status, body));
        }
        serde_json::from_str(&body)
            .map_err(|e| PlatformError::Contract(format!("workspace details: {e}")))
    }

    /// Fetch every email marked interested in the range, following
    /// pagination. Returns only received replies; sender filtering and
    /// summarization happen downstream.
    pub async fn list_interested_replies(
        &self,
        credential: &Credential,
        range: &DateRange,
    ) -> PlatformResult<Vec<ReplyEmail>> {
        let mut replies = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(EMAILS_URL)
                .bearer_auth(credential.token())
                .query(&[
                    ("i_status", "1".to_string()),
                    ("min_timestamp_created", range.start_timestamp()),
                    ("max_timestamp_created", range.end_timestamp()),
                    ("limit", EMAIL_PAGE_LIMIT.to_string()),
                ]);
            if let Some(cursor) = &starting_after {
                request = request.query(&[("starting_after", cursor.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            if !(200..300).contains(&status) {
                return Err(PlatformError::upstream(status, body));
            }

            let page: EmailsPage = serde_json::from_str(&body)
                .map_err(|e| PlatformError::Contract(format!("emails page: {e}")))?;
            debug!(fetched = page.items.len(), "fetched interested-email page");

            let page_len = page.items.len();
            replies.extend(page.items.into_iter().filter(ReplyEmail::is_received_reply));

            starting_after = page.next_starting_after;
            if starting_after.is_none() || page_len < EMAIL_PAGE_LIMIT {
                break;
            }
        }

        Ok(replies)
    }
}

impl Default for InstantlyPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for InstantlyPlatform {
    fn name(&self) -> &'static str {
        "instantly"
    }

    fn reduction(&self) -> Reduction {
        Reduction::Max
    }

    async fn fetch_identity(&self, credential: &Credential) -> PlatformResult<WorkspaceIdentity> {
        let response = self
            .identity_client
            .get(WORKSPACE_URL)
            .bearer_auth(credential.token())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(PlatformError::upstream(status, body));
        }

        let parsed: WorkspaceCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| PlatformError::Contract(format!("workspace identity: {e}")))?;

        let id = parsed.id.unwrap_or_default();
        let name = parsed.name.unwrap_or_else(|| id.clone());
        if id.is_empty() && name.is_empty() {
            return Err(PlatformError::Contract(
                "workspace identity missing both id and name".into(),
            ));
        }
        Ok(WorkspaceIdentity::new(id, name))
    }

    async fn partition_keys(
        &self,
        _credential: &Credential,
        _range: &DateRange,
    ) -> PlatformResult<Vec<PartitionKey>> {
        Ok(CAMPAIGN_STATUSES
            .iter()
            .copied()
            .map(PartitionKey::CampaignStatus)
            .collect())
    }

    async fn fetch_partition(
        &self,
        credential: &Credential,
        range: &DateRange,
        key: &PartitionKey,
    ) -> PlatformResult<Outcome> {
        let PartitionKey::CampaignStatus(campaign_status) = key else {
            return Err(PlatformError::Contract(format!(
                "instantly cannot fetch partition {key}"
            )));
        };

        let response = self
            .client
            .get(OVERVIEW_URL)
            .bearer_auth(credential.token())
            .query(&[
                ("start_date", range.start_str()),
                ("end_date", range.end_str()),
                ("campaign_status", campaign_status.to_string()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Outcome::from_response(status, body)
    }
}
