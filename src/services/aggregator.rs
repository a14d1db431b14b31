//! Workspace Aggregator
//!
//! The unit of parallel work across the roster: resolve identity (cached),
//! fetch and reduce partitions, extract headline metrics, classify health.
//! Each step is independently fault-tolerant — identity failure degrades
//! to label-as-identity, and only a total fetch failure surfaces as a
//! workspace failure.

use std::sync::Arc;

use tracing::{info, warn};

use outreach_pulse_core::{reduce, DateRange, WorkspaceIdentity};
use outreach_pulse_platforms::{fetch_partitions, PartitionFetchConfig, Platform};

use super::identity::IdentityCache;
use crate::models::{WorkspaceFailure, WorkspaceRef, WorkspaceSummary};

/// Per-workspace aggregation over one platform.
pub struct WorkspaceAggregator {
    platform: Arc<dyn Platform>,
    identity_cache: Arc<IdentityCache>,
    fetch_config: PartitionFetchConfig,
}

impl WorkspaceAggregator {
    pub fn new(platform: Arc<dyn Platform>, identity_cache: Arc<IdentityCache>) -> Self {
        Self {
            platform,
            identity_cache,
            fetch_config: PartitionFetchConfig::default(),
        }
    }

    pub fn with_fetch_config(mut self, fetch_config: PartitionFetchConfig) -> Self {
        self.fetch_config = fetch_config;
        self
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    /// Aggregate one workspace. A returned failure carries the roster
    /// label and the underlying error; it never aborts sibling workspaces.
    pub async fn aggregate(
        &self,
        workspace: &WorkspaceRef,
        range: &DateRange,
    ) -> Result<WorkspaceSummary, WorkspaceFailure> {
        let identity = self.resolve_identity(workspace).await;

        let partitions = fetch_partitions(
            self.platform.clone(),
            &workspace.credential,
            range,
            &self.fetch_config,
        )
        .await
        .map_err(|err| WorkspaceFailure {
            label: workspace.label.clone(),
            error: err.to_string(),
        })?;

        let metrics = reduce(
            partitions.iter().map(|p| &p.metrics),
            self.platform.reduction(),
        );

        let summary =
            WorkspaceSummary::from_metrics(identity, workspace.label.clone(), *range, metrics);

        info!(
            platform = self.platform.name(),
            workspace = %summary.identity.display_name,
            range = %range,
            sent = summary.emails_sent,
            replies = summary.replies,
            opps = summary.opportunities,
            health = %summary.health,
            "aggregated workspace"
        );

        Ok(summary)
    }

    /// Resolve identity through the cache; on failure fall back to the
    /// roster label. Non-fatal by design.
    async fn resolve_identity(&self, workspace: &WorkspaceRef) -> WorkspaceIdentity {
        match self
            .identity_cache
            .get_or_resolve(self.platform.as_ref(), &workspace.credential)
            .await
        {
            Ok(identity) => identity,
            Err(err) => {
                warn!(
                    platform = self.platform.name(),
                    label = %workspace.label,
                    %err,
                    "identity lookup failed, using roster label"
                );
                WorkspaceIdentity::from_label(&workspace.label)
            }
        }
    }
}
