//! Agent Tool Traits
//!
//! Core-layer tool abstraction with split definition/execution traits:
//!
//! - `ToolDefinitionTrait` - Identity and parameter schema
//! - `ToolExecutable` - Execution capability
//! - `Tool` - Combined trait (auto-implemented via blanket impl)
//! - `ToolRegistry` - O(1) lookup registry with ordered iteration
//!
//! The split lets schema-only consumers (listing tools for an agent
//! protocol) avoid touching execution dependencies, and lets tests mock
//! definition and execution independently.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CoreResult;

/// Tool definition metadata trait.
///
/// Provides identity and schema information about a tool without requiring
/// execution capability.
pub trait ToolDefinitionTrait: Send + Sync {
    /// Unique name of this tool (e.g., "get_campaign_stats").
    fn name(&self) -> &str;

    /// Human-readable description of what this tool does.
    fn description(&self) -> &str;

    /// JSON schema (draft-07 object schema) describing input parameters.
    fn parameters_schema(&self) -> Value;
}

/// Tool execution trait.
#[async_trait]
pub trait ToolExecutable: Send + Sync {
    /// Execute the tool with JSON arguments matching `parameters_schema()`.
    async fn execute(&self, args: Value) -> CoreResult<Value>;
}

/// Combined tool trait. Implemented automatically for any type that
/// implements both halves.
pub trait Tool: ToolDefinitionTrait + ToolExecutable {}

impl<T: ToolDefinitionTrait + ToolExecutable> Tool for T {}

/// Registry of tools with stable registration order.
#[derive(Default)]
pub struct ToolRegistry {
    order: Vec<String>,
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Re-registering a name replaces the tool but keeps
    /// its original position.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Arc<dyn Tool>> + '_ {
        self.order.iter().filter_map(|name| self.get(name))
    }

    /// Name/description/schema triples for every tool, in order. This is
    /// the shape handed to an agent protocol listing.
    pub fn definitions(&self) -> Vec<Value> {
        self.iter()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.parameters_schema(),
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").field("tools", &self.order).finish()
    }
}
