//! Roster Entries
//!
//! One roster row pairs a display/lookup label with the credential for one
//! upstream workspace. The sheet may carry two extra name columns used by
//! the tool layer for human-friendly lookup; both are optional.

use serde::{Deserialize, Serialize};

use outreach_pulse_core::Credential;

/// One `{label, credential}` pair from the roster, with optional extra
/// name columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceRef {
    /// Roster-provided display/lookup key (column A). May differ from the
    /// upstream-resolved canonical identity.
    pub label: String,
    /// Bearer credential for the workspace (column B).
    pub credential: Credential,
    /// Optional workspace name (column C).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    /// Optional client/person name (column D).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
}

impl WorkspaceRef {
    pub fn new(label: impl Into<String>, credential: Credential) -> Self {
        Self {
            label: label.into(),
            credential,
            workspace_name: None,
            person_name: None,
        }
    }

    /// Best human-readable name: person name, then workspace name, then
    /// the label.
    pub fn display_name(&self) -> &str {
        self.person_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.workspace_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.label)
    }
}
