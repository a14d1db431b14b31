//! Agent Tool Layer
//!
//! Exposes the aggregation engine to an LLM agent as four tools:
//! - `get_client_list` - roster listing, optionally enriched with upstream details
//! - `get_campaign_stats` - headline metrics for one workspace
//! - `get_lead_responses` - cleaned interested-lead list for one workspace
//! - `get_workspace_info` - raw upstream workspace details
//!
//! Every tool takes JSON arguments, resolves free-form workspace queries
//! through [`resolve::resolve_workspace`], and returns a JSON payload the
//! agent can quote directly. Errors are written for the agent to act on,
//! not just for logs.

pub mod campaign_stats;
pub mod client_list;
pub mod lead_responses;
pub mod resolve;
pub mod workspace_info;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use outreach_pulse_core::{CoreError, CoreResult, DateRange, ToolRegistry};
use outreach_pulse_platforms::InstantlyPlatform;

use super::aggregator::WorkspaceAggregator;
use super::leads::LeadFilter;
use super::roster::RosterSource;
use crate::models::WorkspaceRef;
use crate::utils::error::{AppError, AppResult};

pub use campaign_stats::GetCampaignStatsTool;
pub use client_list::GetClientListTool;
pub use lead_responses::GetLeadResponsesTool;
pub use workspace_info::GetWorkspaceInfoTool;

/// Default lookback window when a tool call gives no explicit dates.
const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Widest trailing window a tool call may request (ten years).
const MAX_LOOKBACK_DAYS: i64 = 3650;

/// Shared collaborators for all tools. Built once at startup, cloned into
/// each tool via `Arc`.
pub struct ToolContext {
    pub roster_source: RosterSource,
    pub sheet_url: String,
    pub gid: String,
    pub aggregator: Arc<WorkspaceAggregator>,
    pub instantly: Arc<InstantlyPlatform>,
    pub lead_filter: LeadFilter,
}

impl ToolContext {
    /// Load the roster for one tool call. Never cached: the sheet is the
    /// source of truth and edits must be visible on the next call.
    pub async fn load_roster(&self) -> AppResult<Vec<WorkspaceRef>> {
        self.roster_source.load(&self.sheet_url, &self.gid).await
    }
}

/// Build the registry with the full tool set in presentation order.
pub fn build_registry(ctx: Arc<ToolContext>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetClientListTool::new(ctx.clone())));
    registry.register(Arc::new(GetCampaignStatsTool::new(ctx.clone())));
    registry.register(Arc::new(GetLeadResponsesTool::new(ctx.clone())));
    registry.register(Arc::new(GetWorkspaceInfoTool::new(ctx)));
    registry
}

/// Common date arguments across the per-workspace tools.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct DateArgs {
    start_date: Option<String>,
    end_date: Option<String>,
    days: Option<i64>,
}

impl DateArgs {
    /// Resolve to a concrete range: explicit start+end when both given,
    /// otherwise a trailing window (default one week).
    pub(crate) fn to_range(&self) -> CoreResult<DateRange> {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => {
                let start = parse_date(start)?;
                let end = parse_date(end)?;
                if end < start {
                    return Err(CoreError::validation(format!(
                        "end_date {end} is before start_date {start}"
                    )));
                }
                Ok(DateRange::new(start, end))
            }
            _ => {
                let days = self.days.unwrap_or(DEFAULT_LOOKBACK_DAYS);
                if !(0..=MAX_LOOKBACK_DAYS).contains(&days) {
                    return Err(CoreError::validation(format!(
                        "days must be between 0 and {MAX_LOOKBACK_DAYS}, got {days}"
                    )));
                }
                Ok(DateRange::trailing_days(days))
            }
        }
    }
}

fn parse_date(value: &str) -> CoreResult<NaiveDate> {
    // Accept a bare date or a full timestamp; only the date part matters.
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| CoreError::validation(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

/// Translate application errors to the core error set tools return.
pub(crate) fn to_tool_error(err: AppError) -> CoreError {
    match err {
        AppError::Validation(msg) => CoreError::validation(msg),
        AppError::NotFound(msg) => CoreError::not_found(msg),
        other => CoreError::internal(other.to_string()),
    }
}
