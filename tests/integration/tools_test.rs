//! Agent Tool Registry Tests
//!
//! Verifies the registry exposes the full tool set with well-formed
//! definitions. Execution paths that reach upstream are covered by the
//! per-service tests; nothing here touches the network.

use std::sync::Arc;

use outreach_pulse::services::aggregator::WorkspaceAggregator;
use outreach_pulse::services::identity::IdentityCache;
use outreach_pulse::services::leads::LeadFilter;
use outreach_pulse::services::roster::{RosterSource, DEFAULT_SHEET_GID};
use outreach_pulse::services::tools::{build_registry, ToolContext};
use outreach_pulse_platforms::InstantlyPlatform;

fn registry() -> outreach_pulse_core::ToolRegistry {
    let instantly = Arc::new(InstantlyPlatform::new());
    let aggregator = Arc::new(WorkspaceAggregator::new(
        instantly.clone(),
        Arc::new(IdentityCache::new()),
    ));
    build_registry(Arc::new(ToolContext {
        roster_source: RosterSource::new(),
        sheet_url: "https://docs.google.com/spreadsheets/d/test".to_string(),
        gid: DEFAULT_SHEET_GID.to_string(),
        aggregator,
        instantly,
        lead_filter: LeadFilter::default(),
    }))
}

#[test]
fn test_registry_exposes_all_four_tools() {
    let registry = registry();
    assert_eq!(registry.len(), 4);

    for name in [
        "get_client_list",
        "get_campaign_stats",
        "get_lead_responses",
        "get_workspace_info",
    ] {
        assert!(registry.get(name).is_some(), "missing tool '{name}'");
    }
}

#[test]
fn test_definitions_are_well_formed_and_ordered() {
    let registry = registry();
    let defs = registry.definitions();

    let names: Vec<&str> = defs
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "get_client_list",
            "get_campaign_stats",
            "get_lead_responses",
            "get_workspace_info"
        ]
    );

    for def in &defs {
        assert!(!def["description"].as_str().unwrap().is_empty());
        assert_eq!(def["parameters"]["type"], "object");
        assert!(def["parameters"]["properties"].is_object());
    }
}

#[test]
fn test_workspace_tools_require_workspace_id() {
    let registry = registry();
    for name in ["get_campaign_stats", "get_lead_responses", "get_workspace_info"] {
        let tool = registry.get(name).unwrap();
        let required = tool.parameters_schema()["required"].clone();
        assert_eq!(
            required.as_array().unwrap()[0],
            "workspace_id",
            "tool '{name}' must require workspace_id"
        );
    }
}
