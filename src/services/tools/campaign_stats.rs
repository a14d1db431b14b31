//! get_campaign_stats Tool
//!
//! Headline metrics for one workspace over a date range, computed through
//! the same aggregation path as a full run (all campaign-status partitions,
//! reduced, health-classified).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use outreach_pulse_core::{CoreError, CoreResult, ToolDefinitionTrait, ToolExecutable};

use super::resolve::resolve_workspace;
use super::{to_tool_error, DateArgs, ToolContext};

pub struct GetCampaignStatsTool {
    ctx: Arc<ToolContext>,
}

impl GetCampaignStatsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

impl ToolDefinitionTrait for GetCampaignStatsTool {
    fn name(&self) -> &str {
        "get_campaign_stats"
    }

    fn description(&self) -> &str {
        "Get campaign statistics (emails sent, replies, opportunities, reply rate, health) for one client workspace. Accepts a client name, person name, or workspace label."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workspace_id": {
                    "type": "string",
                    "description": "Client name or workspace label (e.g. \"Acme Corp\")"
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date, YYYY-MM-DD (optional when using days)"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date, YYYY-MM-DD (optional when using days)"
                },
                "days": {
                    "type": "integer",
                    "description": "Trailing window in days when no explicit dates are given (default: 7)"
                }
            },
            "required": ["workspace_id"]
        })
    }
}

#[async_trait]
impl ToolExecutable for GetCampaignStatsTool {
    async fn execute(&self, args: Value) -> CoreResult<Value> {
        let query = args
            .get("workspace_id")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::validation("missing required parameter: workspace_id"))?
            .to_string();
        let dates: DateArgs = serde_json::from_value(args)?;
        let range = dates.to_range()?;

        let roster = self.ctx.load_roster().await.map_err(to_tool_error)?;
        let workspace = resolve_workspace(&roster, &query).map_err(to_tool_error)?;

        let summary = self
            .ctx
            .aggregator
            .aggregate(workspace, &range)
            .await
            .map_err(|failure| CoreError::internal(failure.error))?;

        Ok(json!({
            "workspace_id": summary.identity.canonical_id,
            "client_name": summary.identity.display_name,
            "start_date": range.start_str(),
            "end_date": range.end_str(),
            "emails_sent": summary.emails_sent,
            "replies": summary.replies,
            "opportunities": summary.opportunities,
            "reply_rate": summary.metrics.reply_rate(),
            "health": summary.health.as_str(),
        }))
    }
}
