//! Platform Trait
//!
//! Defines the common interface both upstream adapters implement.
//!
//! The upstream APIs cannot return an aggregate workspace total directly;
//! a complete picture requires querying disjoint partitions (campaign-
//! status filters on Instantly, individual campaigns on Smartlead) and
//! merging the partial results with the platform's reduction rule.

use async_trait::async_trait;
use serde_json::{Map, Value};

use outreach_pulse_core::{Credential, DateRange, Reduction, WorkspaceIdentity};

use crate::outcome::{Outcome, PlatformResult};

/// Identifies one partition of a workspace's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionKey {
    /// An Instantly campaign-status filter (0..4, -99, -1, -2).
    CampaignStatus(i32),
    /// One Smartlead campaign.
    Campaign { id: i64, name: String },
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionKey::CampaignStatus(status) => write!(f, "status={status}"),
            PartitionKey::Campaign { id, name } => write!(f, "campaign={id} ({name})"),
        }
    }
}

/// Raw result of one successful upstream call for one partition.
#[derive(Debug, Clone)]
pub struct MetricPartition {
    pub key: PartitionKey,
    pub metrics: Map<String, Value>,
}

/// Per-platform upstream adapter.
///
/// Implementations perform single bounded HTTP calls and classify the
/// result; they never retry internally. Retry is layered on by
/// [`crate::retry::RetryPolicy`], concurrency by [`crate::fetch`].
#[async_trait]
pub trait Platform: Send + Sync {
    /// Platform name for logs and reports.
    fn name(&self) -> &'static str;

    /// How this platform's partitions merge into one workspace map.
    fn reduction(&self) -> Reduction;

    /// Resolve a credential to its workspace identity.
    async fn fetch_identity(&self, credential: &Credential) -> PlatformResult<WorkspaceIdentity>;

    /// Enumerate the partitions to query for a workspace. Constant for
    /// Instantly (the fixed status list); a paginated campaign listing for
    /// Smartlead.
    async fn partition_keys(
        &self,
        credential: &Credential,
        range: &DateRange,
    ) -> PlatformResult<Vec<PartitionKey>>;

    /// Perform the single metrics call for one partition and classify the
    /// outcome.
    async fn fetch_partition(
        &self,
        credential: &Credential,
        range: &DateRange,
        key: &PartitionKey,
    ) -> PlatformResult<Outcome>;
}
