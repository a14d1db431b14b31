//! Outreach Pulse Core
//!
//! Dependency-light foundation shared across the Outreach Pulse workspace:
//! error types, date ranges, the reduced-metrics map and its reduction
//! rules, the workspace health classifier, and the agent tool traits.
//!
//! Nothing in this crate performs I/O; the platform adapters and
//! orchestration services build on top of it.

pub mod date_range;
pub mod error;
pub mod health;
pub mod metrics;
pub mod tool_trait;
pub mod workspace;

// Re-export main types
pub use date_range::DateRange;
pub use error::{CoreError, CoreResult};
pub use health::{classify_health, health_rules, HealthLabel, MIN_EMAILS_FOR_HEALTH};
pub use metrics::{reduce, ReducedMetrics, Reduction};
pub use tool_trait::{Tool, ToolDefinitionTrait, ToolExecutable, ToolRegistry};
pub use workspace::{Credential, WorkspaceIdentity};
