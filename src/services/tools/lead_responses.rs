//! get_lead_responses Tool
//!
//! Interested-lead listing for one workspace: fetches every reply marked
//! interested in the range, then filters, summarizes, and de-duplicates
//! through the lead post-processing pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use outreach_pulse_core::{CoreError, CoreResult, ToolDefinitionTrait, ToolExecutable};

use super::super::leads::collect_interested;
use super::resolve::resolve_workspace;
use super::{to_tool_error, DateArgs, ToolContext};

pub struct GetLeadResponsesTool {
    ctx: Arc<ToolContext>,
}

impl GetLeadResponsesTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

impl ToolDefinitionTrait for GetLeadResponsesTool {
    fn name(&self) -> &str {
        "get_lead_responses"
    }

    fn description(&self) -> &str {
        "Get positive (interested) lead responses for one client workspace, with reply summaries. Accepts a client name, person name, or workspace label."
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
impl ToolExecutable for GetLeadResponsesTool {
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

        let replies = self
            .ctx
            .instantly
            .list_interested_replies(&workspace.credential, &range)
            .await
            .map_err(|err| CoreError::internal(err.to_string()))?;

        let leads = collect_interested(replies, &self.ctx.lead_filter);
        info!(
            workspace = %workspace.label,
            range = %range,
            leads = leads.len(),
            "collected interested leads"
        );

        Ok(json!({
            "workspace_id": workspace.label,
            "client_name": workspace.display_name(),
            "start_date": range.start_timestamp(),
            "end_date": range.end_timestamp(),
            "total_leads": leads.len(),
            "leads": leads,
        }))
    }
}
