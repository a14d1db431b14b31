//! Services
//!
//! Orchestration around the platform adapters: roster loading, identity
//! caching, per-workspace aggregation, the roster-wide run coordinator,
//! roll-up analytics, interested-lead post-processing, webhook forwarding,
//! and the agent tool layer.

pub mod aggregator;
pub mod analytics;
pub mod identity;
pub mod leads;
pub mod roster;
pub mod run;
pub mod tools;
pub mod webhook;
