//! Run Results
//!
//! Immutable per-workspace summaries and the roster-wide run result built
//! from them. A summary is created once per run per workspace and never
//! mutated afterwards; totals are the elementwise sum over the summaries
//! actually present — workspaces that failed entirely are excluded, never
//! zero-filled.

use serde::{Deserialize, Serialize};

use outreach_pulse_core::{DateRange, HealthLabel, ReducedMetrics, WorkspaceIdentity};

/// Per-workspace aggregation result for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    #[serde(flatten)]
    pub identity: WorkspaceIdentity,
    /// Roster label the workspace was looked up under.
    pub label: String,
    #[serde(flatten)]
    pub date_range: DateRange,
    /// Full reduced metric map as the upstream reported it.
    pub metrics: ReducedMetrics,
    /// Headline metrics, zero-defaulted at extraction.
    pub emails_sent: i64,
    pub replies: i64,
    pub opportunities: i64,
    pub health: HealthLabel,
}

impl WorkspaceSummary {
    /// Construct a summary from a reduced metric map, extracting and
    /// classifying the headline metrics.
    pub fn from_metrics(
        identity: WorkspaceIdentity,
        label: impl Into<String>,
        date_range: DateRange,
        metrics: ReducedMetrics,
    ) -> Self {
        let emails_sent = metrics.emails_sent();
        let replies = metrics.replies();
        let opportunities = metrics.opportunities();
        let health = outreach_pulse_core::classify_health(emails_sent, opportunities);
        Self {
            identity,
            label: label.into(),
            date_range,
            metrics,
            emails_sent,
            replies,
            opportunities,
            health,
        }
    }
}

/// A workspace that failed entirely in one run. Reported, not fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceFailure {
    pub label: String,
    pub error: String,
}

/// Roster-wide aggregation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(flatten)]
    pub date_range: DateRange,
    /// Elementwise sum over the metric maps of all summaries present.
    pub totals: ReducedMetrics,
    pub summaries: Vec<WorkspaceSummary>,
    /// Roster size, including workspaces that failed.
    pub workspace_count: usize,
    pub failures: Vec<WorkspaceFailure>,
}

impl RunResult {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_extracts_and_classifies() {
        let metrics: ReducedMetrics = [
            ("emails_sent_count".to_string(), 2500),
            ("reply_count_unique".to_string(), 12),
        ]
        .into_iter()
        .collect();

        let summary = WorkspaceSummary::from_metrics(
            WorkspaceIdentity::new("ws-1", "Acme"),
            "acme",
            DateRange::year_to_date(),
            metrics,
        );

        assert_eq!(summary.emails_sent, 2500);
        assert_eq!(summary.replies, 12);
        // No opportunities key reported: extracted as zero, so at risk.
        assert_eq!(summary.opportunities, 0);
        assert_eq!(summary.health, HealthLabel::AtRisk);
    }

    #[test]
    fn test_summary_serializes_flat() {
        let summary = WorkspaceSummary::from_metrics(
            WorkspaceIdentity::new("ws-1", "Acme"),
            "acme",
            DateRange::year_to_date(),
            ReducedMetrics::new(),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["canonical_id"], "ws-1");
        assert_eq!(json["display_name"], "Acme");
        assert!(json["start_date"].is_string());
        assert_eq!(json["health"], "early");
    }
}
