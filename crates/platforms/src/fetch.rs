//! Partition Fetcher
//!
//! Issues every partition query for one workspace concurrently under a
//! bounded worker pool and collects the partial results. Omission is the
//! normal path for most partition keys in any given date range:
//!
//! - `EmptyFiltered` (and the 400/404 statuses behind it) — the filter
//!   simply had no matching data; omitted silently.
//! - `RateLimited` / `ServerError` after retry exhaustion, and transport
//!   errors after retry exhaustion — omitted and logged.
//! - Any other non-success — a contract error worth surfacing; propagated
//!   as a fetch failure for the whole workspace.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use outreach_pulse_core::DateRange;

use crate::outcome::{Outcome, PlatformError, PlatformResult};
use crate::platform::{MetricPartition, Platform};
use crate::retry::RetryPolicy;
use outreach_pulse_core::Credential;

/// Bounds for the per-workspace partition fan-out.
#[derive(Debug, Clone)]
pub struct PartitionFetchConfig {
    /// Maximum concurrent partition calls per workspace.
    pub max_concurrent: usize,
    /// Retry policy applied to each partition call.
    pub retry: RetryPolicy,
}

impl Default for PartitionFetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            retry: RetryPolicy::default(),
        }
    }
}

/// Fetch all partitions for one workspace, returning only those that
/// succeeded.
pub async fn fetch_partitions(
    platform: Arc<dyn Platform>,
    credential: &Credential,
    range: &DateRange,
    config: &PartitionFetchConfig,
) -> PlatformResult<Vec<MetricPartition>> {
    let keys = platform.partition_keys(credential, range).await?;
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent.max(1)));

    let mut handles = Vec::with_capacity(keys.len());
    for key in keys {
        let sem = semaphore.clone();
        let platform = platform.clone();
        let credential = credential.clone();
        let range = *range;
        let retry = config.retry.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore never closed");
            let outcome = retry
                .call_outcome(|| platform.fetch_partition(&credential, &range, &key))
                .await;
            (key, outcome)
        }));
    }

    let mut partitions = Vec::new();
    for handle in handles {
        let (key, outcome) = handle
            .await
            .map_err(|e| PlatformError::Contract(format!("partition task panicked: {e}")))?;

        match outcome {
            Ok(Outcome::Success(value)) => match value {
                serde_json::Value::Object(metrics) => {
                    partitions.push(MetricPartition { key, metrics });
                }
                other => {
                    return Err(PlatformError::Contract(format!(
                        "partition {key} returned non-object metrics: {other}"
                    )));
                }
            },
            Ok(Outcome::EmptyFiltered) => {
                debug!(platform = platform.name(), %key, "no matching data, partition omitted");
            }
            Ok(Outcome::RateLimited) => {
                warn!(platform = platform.name(), %key, "rate limited after retries, partition omitted");
            }
            Ok(Outcome::ServerError(status)) => {
                warn!(platform = platform.name(), %key, status, "upstream server error, partition omitted");
            }
            Ok(Outcome::ClientError(status, body)) => {
                return Err(PlatformError::upstream(status, body));
            }
            Err(err) if err.is_retryable(true) => {
                // Transport failure that survived the retry budget.
                warn!(platform = platform.name(), %key, %err, "transient failure after retries, partition omitted");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(partitions)
}
