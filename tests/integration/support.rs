//! Shared test doubles: an in-memory platform scripted per credential, and
//! roster builders.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use outreach_pulse::models::WorkspaceRef;
use outreach_pulse::services::aggregator::WorkspaceAggregator;
use outreach_pulse::services::identity::IdentityCache;
use outreach_pulse_core::{Credential, DateRange, Reduction, WorkspaceIdentity};
use outreach_pulse_platforms::{
    Outcome, PartitionFetchConfig, PartitionKey, PlatformError, PlatformResult, Platform,
    RetryPolicy,
};

/// What one scripted workspace does when queried.
#[derive(Clone)]
pub enum Script {
    /// Every partition succeeds with the given metric maps.
    Partitions(Vec<Map<String, Value>>),
    /// Every call fails with this upstream status.
    Broken(u16),
}

/// In-memory platform keyed by credential token.
pub struct ScriptedPlatform {
    reduction: Reduction,
    scripts: HashMap<String, Script>,
}

impl ScriptedPlatform {
    pub fn new(reduction: Reduction) -> Self {
        Self {
            reduction,
            scripts: HashMap::new(),
        }
    }

    pub fn with_script(mut self, token: &str, script: Script) -> Self {
        self.scripts.insert(token.to_string(), script);
        self
    }

    fn script(&self, credential: &Credential) -> PlatformResult<&Script> {
        self.scripts
            .get(credential.token())
            .ok_or_else(|| PlatformError::Contract(format!("unscripted credential {credential}")))
    }
}

#[async_trait]
impl Platform for ScriptedPlatform {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn reduction(&self) -> Reduction {
        self.reduction
    }

    async fn fetch_identity(&self, credential: &Credential) -> PlatformResult<WorkspaceIdentity> {
        match self.script(credential)? {
            Script::Broken(status) => Err(PlatformError::upstream(*status, "scripted failure")),
            Script::Partitions(_) => {
                let token = credential.token();
                Ok(WorkspaceIdentity::new(
                    format!("id-{token}"),
                    format!("Workspace {token}"),
                ))
            }
        }
    }

    async fn partition_keys(
        &self,
        credential: &Credential,
        _range: &DateRange,
    ) -> PlatformResult<Vec<PartitionKey>> {
        match self.script(credential)? {
            Script::Broken(status) => Err(PlatformError::upstream(*status, "scripted failure")),
            Script::Partitions(partitions) => Ok((0..partitions.len() as i32)
                .map(PartitionKey::CampaignStatus)
                .collect()),
        }
    }

    async fn fetch_partition(
        &self,
        credential: &Credential,
        _range: &DateRange,
        key: &PartitionKey,
    ) -> PlatformResult<Outcome> {
        let partitions = match self.script(credential)? {
            Script::Broken(status) => {
                return Ok(Outcome::ClientError(*status, "scripted failure".to_string()))
            }
            Script::Partitions(partitions) => partitions,
        };
        let PartitionKey::CampaignStatus(idx) = key else {
            return Err(PlatformError::Contract("unexpected key kind".to_string()));
        };
        Ok(Outcome::Success(Value::Object(
            partitions[*idx as usize].clone(),
        )))
    }
}

/// Metric map literal helper.
pub fn metrics(pairs: &[(&str, i64)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}

pub fn roster_entry(label: &str, token: &str) -> WorkspaceRef {
    WorkspaceRef {
        label: label.to_string(),
        credential: Credential::new(token),
        workspace_name: None,
        person_name: None,
    }
}

/// Aggregator over a scripted platform with test-speed retry delays.
pub fn aggregator(platform: ScriptedPlatform) -> Arc<WorkspaceAggregator> {
    let retry = RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        pacing: Duration::ZERO,
        retry_server_errors: false,
    };
    let fetch_config = PartitionFetchConfig {
        max_concurrent: 4,
        retry: retry.clone(),
    };
    Arc::new(
        WorkspaceAggregator::new(
            Arc::new(platform),
            Arc::new(IdentityCache::with_retry(retry)),
        )
        .with_fetch_config(fetch_config),
    )
}
