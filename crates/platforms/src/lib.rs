//! Outreach Pulse Platforms
//!
//! Upstream adapters for the two cold-email platforms a roster can point
//! at:
//! - Instantly — workspace analytics partitioned by campaign-status filter,
//!   merged by per-key maximum
//! - Smartlead — per-campaign analytics, merged by per-key sum
//!
//! Also includes outcome classification for upstream responses, the
//! bounded-backoff retry policy, the concurrent partition fetcher, and the
//! HTTP client factory.

pub mod fetch;
pub mod http_client;
pub mod instantly;
pub mod outcome;
pub mod platform;
pub mod retry;
pub mod smartlead;

// Re-export main types
pub use fetch::{fetch_partitions, PartitionFetchConfig};
pub use http_client::build_http_client;
pub use instantly::{InstantlyPlatform, ReplyBody, ReplyEmail};
pub use outcome::{Outcome, PlatformError, PlatformResult};
pub use platform::{MetricPartition, PartitionKey, Platform};
pub use retry::RetryPolicy;
pub use smartlead::SmartleadPlatform;
