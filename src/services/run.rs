//! Run Coordinator
//!
//! Fans the workspace aggregator out across the entire roster with bounded
//! concurrency and collects the results. A per-workspace failure is logged
//! and excluded from both `summaries` and `totals`; it never aborts the
//! run. Reduction and totals are commutative over the set of completed
//! workspaces, so the result is deterministic regardless of completion
//! order.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use outreach_pulse_core::{DateRange, ReducedMetrics};

use super::aggregator::WorkspaceAggregator;
use crate::models::{RunResult, WorkspaceFailure, WorkspaceRef};

/// Bounds for the roster-wide fan-out.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum workspaces aggregated concurrently.
    pub max_concurrent: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { max_concurrent: 10 }
    }
}

/// Roster-wide aggregation coordinator.
pub struct RunCoordinator {
    aggregator: Arc<WorkspaceAggregator>,
    config: RunConfig,
}

impl RunCoordinator {
    pub fn new(aggregator: Arc<WorkspaceAggregator>) -> Self {
        Self {
            aggregator,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Aggregate every workspace in the roster. Always returns a
    /// `RunResult`; individual workspace failures are visible in
    /// `failures`, never as an error from this method.
    pub async fn run(&self, roster: &[WorkspaceRef], range: &DateRange) -> RunResult {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let workspace_count = roster.len();

        let mut handles = Vec::with_capacity(workspace_count);
        for workspace in roster {
            let sem = semaphore.clone();
            let aggregator = self.aggregator.clone();
            let workspace = workspace.clone();
            let range = *range;

            handles.push(tokio::spawn(async move {
                let _permit = sem.acquire().await.expect("semaphore never closed");
                aggregator.aggregate(&workspace, &range).await
            }));
        }

        let mut totals = ReducedMetrics::new();
        let mut summaries = Vec::new();
        let mut failures = Vec::new();

        for (handle, workspace) in handles.into_iter().zip(roster) {
            match handle.await {
                Ok(Ok(summary)) => {
                    totals.add_assign(&summary.metrics);
                    summaries.push(summary);
                }
                Ok(Err(failure)) => {
                    warn!(label = %failure.label, error = %failure.error, "workspace failed, excluded from totals");
                    failures.push(failure);
                }
                Err(join_err) => {
                    warn!(label = %workspace.label, %join_err, "workspace task panicked");
                    failures.push(WorkspaceFailure {
                        label: workspace.label.clone(),
                        error: join_err.to_string(),
                    });
                }
            }
        }

        info!(
            platform = self.aggregator.platform().name(),
            range = %range,
            workspaces = workspace_count,
            succeeded = summaries.len(),
            failed = failures.len(),
            "run complete"
        );

        RunResult {
            date_range: *range,
            totals,
            summaries,
            workspace_count,
            failures,
        }
    }
}
