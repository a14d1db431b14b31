//! Smartlead Adapter
//!
//! Smartlead has no workspace-level analytics endpoint; a workspace total
//! is assembled from its campaigns. Campaigns are genuinely disjoint
//! units, so per-campaign analytics add — reduction mode: sum-merge.
//!
//! Auth is an `api_key` query parameter rather than a bearer header.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use outreach_pulse_core::{Credential, DateRange, Reduction, WorkspaceIdentity};

use crate::http_client::{build_http_client, DEFAULT_TIMEOUT_SECS, IDENTITY_TIMEOUT_SECS};
use crate::outcome::{Outcome, PlatformError, PlatformResult};
use crate::platform::{PartitionKey, Platform};

/// API base URL.
const BASE_URL: &str = "https://server.smartlead.ai/api/v1";

/// Page size for campaign listing.
const CAMPAIGN_PAGE_LIMIT: usize = 100;

/// One campaign from the listing.
#[derive(Debug, Deserialize)]
struct CampaignListItem {
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

/// Account profile from `/me`.
#[derive(Debug, Deserialize)]
struct AccountResponse {
    id: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
}

/// Smartlead upstream adapter.
pub struct SmartleadPlatform {
    base_url: String,
    client: reqwest::Client,
    identity_client: reqwest::Client,
}

impl SmartleadPlatform {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Override the API base URL (test servers, regional endpoints).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            identity_client: build_http_client(Duration::from_secs(IDENTITY_TIMEOUT_SECS)),
        }
    }

    /// List all campaigns for the account, following offset pagination.
    async fn list_campaigns(&self, credential: &Credential) -> PlatformResult<Vec<CampaignListItem>> {
        let mut campaigns = Vec::new();
        let mut offset = 0usize;

        loop {
            let response = self
                .client
                .get(format!("{}/campaigns", self.base_url))
                .query(&[
                    ("api_key", credential.token().to_string()),
                    ("offset", offset.to_string()),
                    ("limit", CAMPAIGN_PAGE_LIMIT.to_string()),
                ])
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            if !(200..300).contains(&status) {
                return Err(PlatformError::upstream(status, body));
            }

            let page: Vec<CampaignListItem> = serde_json::from_str(&body)
                .map_err(|e| PlatformError::Contract(format!("campaign listing: {e}")))?;
            debug!(fetched = page.len(), offset, "fetched campaign page");

            let page_len = page.len();
            campaigns.extend(page);
            if page_len < CAMPAIGN_PAGE_LIMIT {
                break;
            }
            offset += page_len;
        }

        Ok(campaigns)
    }
}

impl Default for SmartleadPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for SmartleadPlatform {
    fn name(&self) -> &'static str {
        "smartlead"
    }

    fn reduction(&self) -> Reduction {
        Reduction::Sum
    }

    async fn fetch_identity(&self, credential: &Credential) -> PlatformResult<WorkspaceIdentity> {
        let response = self
            .identity_client
            .get(format!("{}/me", self.base_url))
            .query(&[("api_key", credential.token())])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(PlatformError::upstream(status, body));
        }

        let parsed: AccountResponse = serde_json::from_str(&body)
            .map_err(|e| PlatformError::Contract(format!("account profile: {e}")))?;

        // Numeric account ids are common here; normalize to string.
        let id = parsed
            .id
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .unwrap_or_default();
        let name = parsed.name.unwrap_or_else(|| id.clone());
        if id.is_empty() && name.is_empty() {
            return Err(PlatformError::Contract(
                "account profile missing both id and name".into(),
            ));
        }
        Ok(WorkspaceIdentity::new(id, name))
    }

    async fn partition_keys(
        &self,
        credential: &Credential,
        _range: &DateRange,
    ) -> PlatformResult<Vec<PartitionKey>> {
        let campaigns = self.list_campaigns(credential).await?;
        Ok(campaigns
            .into_iter()
            .map(|c| PartitionKey::Campaign {
                id: c.id,
                name: c.name.unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_partition(
        &self,
        credential: &Credential,
        range: &DateRange,
        key: &PartitionKey,
    ) -> PlatformResult<Outcome> {
        let PartitionKey::Campaign { id, .. } = key else {
            return Err(PlatformError::Contract(format!(
                "smartlead cannot fetch partition {key}"
            )));
        };

        let response = self
            .client
            .get(format!("{}/campaigns/{id}/analytics", self.base_url))
            .query(&[
                ("api_key", credential.token().to_string()),
                ("start_date", range.start_str()),
                ("end_date", range.end_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Outcome::from_response(status, body)
    }
}
