//! get_workspace_info Tool
//!
//! Raw workspace details for one roster entry, fetched straight from the
//! upstream identity endpoint and reshaped to a stable field set.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use outreach_pulse_core::{CoreError, CoreResult, ToolDefinitionTrait, ToolExecutable};

use super::resolve::resolve_workspace;
use super::{to_tool_error, ToolContext};

/// Detail fields lifted verbatim from the upstream payload.
const DETAIL_FIELDS: [&str; 8] = [
    "owner",
    "plan_id",
    "org_logo_url",
    "org_client_domain",
    "plan_id_crm",
    "plan_id_leadfinder",
    "timestamp_created",
    "timestamp_updated",
];

pub struct GetWorkspaceInfoTool {
    ctx: Arc<ToolContext>,
}

impl GetWorkspaceInfoTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

impl ToolDefinitionTrait for GetWorkspaceInfoTool {
    fn name(&self) -> &str {
        "get_workspace_info"
    }

    fn description(&self) -> &str {
        "Get detailed workspace information (name, owner, plan, domain, timestamps) for one client workspace. Accepts a client name, person name, or workspace label."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workspace_id": {
                    "type": "string",
                    "description": "Client name or workspace label (e.g. \"Acme Corp\")"
                }
            },
            "required": ["workspace_id"]
        })
    }
}

#[async_trait]
impl ToolExecutable for GetWorkspaceInfoTool {
    async fn execute(&self, args: Value) -> CoreResult<Value> {
        let query = args
            .get("workspace_id")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::validation("missing required parameter: workspace_id"))?;

        let roster = self.ctx.load_roster().await.map_err(to_tool_error)?;
        let workspace = resolve_workspace(&roster, query).map_err(to_tool_error)?;

        let details = self
            .ctx
            .instantly
            .workspace_details(&workspace.credential)
            .await
            .map_err(|err| {
                CoreError::internal(format!(
                    "failed to fetch workspace details for '{}': {err}",
                    workspace.label
                ))
            })?;

        let mut info = json!({
            "workspace_id": details.get("id").cloned().unwrap_or(json!(workspace.label)),
            "workspace_name": details.get("name").cloned().unwrap_or(Value::Null),
        });
        for field in DETAIL_FIELDS {
            info[field] = details.get(field).cloned().unwrap_or(Value::Null);
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_workspace_id() {
        let tool = GetWorkspaceInfoTool::new(super::super::tests_support::context());
        assert_eq!(tool.name(), "get_workspace_info");
        assert_eq!(tool.parameters_schema()["required"], json!(["workspace_id"]));
    }

    #[tokio::test]
    async fn test_missing_workspace_id_rejected() {
        let tool = GetWorkspaceInfoTool::new(super::super::tests_support::context());
        let err = tool.execute(json!({"name": "acme"})).await.unwrap_err();
        assert!(err.to_string().contains("workspace_id"));
    }
}
