//! Outreach Pulse
//!
//! Aggregates cold-email campaign performance metrics across many tenant
//! workspaces on two upstream platforms (Instantly, Smartlead). Given a
//! roster of (workspace, credential) pairs and a date range, the engine
//! fans out parallel upstream queries, merges partitioned results with
//! platform-specific reduction rules, survives partial upstream failure
//! and rate limiting, and produces a stable per-workspace summary plus
//! roster-wide totals.

pub mod models;
pub mod services;
pub mod utils;

pub use utils::error::{AppError, AppResult};
