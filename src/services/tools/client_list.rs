//! get_client_list Tool
//!
//! Lists every roster workspace. With `include_details`, entries whose
//! display name is just the roster label get enriched from the upstream
//! workspace details payload (name, plan, organization domain).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use outreach_pulse_core::{CoreResult, ToolDefinitionTrait, ToolExecutable};

use super::{to_tool_error, ToolContext};

pub struct GetClientListTool {
    ctx: Arc<ToolContext>,
}

impl GetClientListTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

impl ToolDefinitionTrait for GetClientListTool {
    fn name(&self) -> &str {
        "get_client_list"
    }

    fn description(&self) -> &str {
        "List all available client workspaces from the roster. Set include_details to resolve display names from the platform for entries that only have an opaque label."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "include_details": {
                    "type": "boolean",
                    "description": "Resolve workspace names from the platform for unnamed entries (default: false)"
                }
            },
            "required": []
        })
    }
}

#[async_trait]
impl ToolExecutable for GetClientListTool {
    async fn execute(&self, args: Value) -> CoreResult<Value> {
        let include_details = args
            .get("include_details")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let roster = self.ctx.load_roster().await.map_err(to_tool_error)?;

        let mut clients = Vec::with_capacity(roster.len());
        for workspace in &roster {
            let mut entry = json!({
                "workspace_id": workspace.label,
                "client_name": workspace.display_name(),
            });

            // Only hit the platform for entries the sheet leaves unnamed.
            if include_details && workspace.display_name() == workspace.label {
                debug!(label = %workspace.label, "fetching details for unnamed roster entry");
                match self.ctx.instantly.workspace_details(&workspace.credential).await {
                    Ok(details) => apply_details(&mut entry, &workspace.label, &details),
                    Err(err) => {
                        debug!(label = %workspace.label, error = %err, "workspace details unavailable");
                        entry["workspace_name"] = Value::String(workspace.label.clone());
                    }
                }
            }

            clients.push(entry);
        }

        Ok(json!({
            "total_clients": clients.len(),
            "clients": clients,
        }))
    }
}

/// Fold the interesting detail fields into a client entry. The upstream
/// payload calls the domain `org_client_domain`; we expose it as
/// `org_domain`.
fn apply_details(entry: &mut Value, label: &str, details: &Value) {
    entry["workspace_name"] = details
        .get("name")
        .cloned()
        .unwrap_or_else(|| Value::String(label.to_string()));
    if let Some(plan) = details.get("plan_id") {
        entry["plan_id"] = plan.clone();
    }
    if let Some(domain) = details.get("org_client_domain") {
        entry["org_domain"] = domain.clone();
    }
}
