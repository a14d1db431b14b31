//! Workspace Health Classification
//!
//! Pure threshold classifier over the two headline metrics. The `early`
//! check is evaluated before `at_risk`: a workspace under the send
//! threshold is always `early`, no matter its opportunity count.

use serde::{Deserialize, Serialize};

/// Minimum sends in the range before health is judged at all.
pub const MIN_EMAILS_FOR_HEALTH: i64 = 2000;

/// Three-state workspace health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLabel {
    Early,
    AtRisk,
    Healthy,
}

impl HealthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Early => "early",
            HealthLabel::AtRisk => "at_risk",
            HealthLabel::Healthy => "healthy",
        }
    }
}

impl std::fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a workspace from its reduced headline metrics.
///
/// - `early`   — fewer than [`MIN_EMAILS_FOR_HEALTH`] emails sent
/// - `at_risk` — at or over the threshold with zero opportunities
/// - `healthy` — everything else
pub fn classify_health(emails_sent: i64, opportunities: i64) -> HealthLabel {
    if emails_sent < MIN_EMAILS_FOR_HEALTH {
        return HealthLabel::Early;
    }
    if opportunities == 0 {
        return HealthLabel::AtRisk;
    }
    HealthLabel::Healthy
}

/// One row of the health legend shown to downstream consumers.
/// Serialize-only: the legend is produced, never read back.
#[derive(Debug, Clone, Serialize)]
pub struct HealthRule {
    pub key: &'static str,
    pub label: &'static str,
    pub description: String,
}

/// The health legend, in display order.
pub fn health_rules() -> Vec<HealthRule> {
    vec![
        HealthRule {
            key: "healthy",
            label: "🟢 Healthy",
            description: format!(
                "At least 1 opportunity in the selected date range and {MIN_EMAILS_FOR_HEALTH}+ emails sent."
            ),
        },
        HealthRule {
            key: "at_risk",
            label: "🔴 At Risk",
            description: format!(
                "{MIN_EMAILS_FOR_HEALTH}+ emails sent in the selected date range and 0 opportunities. This needs attention."
            ),
        },
        HealthRule {
            key: "early",
            label: "🟡 Early",
            description: format!(
                "Fewer than {MIN_EMAILS_FOR_HEALTH} emails sent in the selected date range. Still warming up / not enough data yet."
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_health(1999, 0), HealthLabel::Early);
        assert_eq!(classify_health(2000, 0), HealthLabel::AtRisk);
        assert_eq!(classify_health(2000, 1), HealthLabel::Healthy);
        assert_eq!(classify_health(50000, 0), HealthLabel::AtRisk);
    }

    #[test]
    fn test_early_takes_precedence_over_at_risk() {
        // Below the send threshold, opportunity count is irrelevant.
        assert_eq!(classify_health(0, 0), HealthLabel::Early);
        assert_eq!(classify_health(1999, 5), HealthLabel::Early);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(
            serde_json::to_value(HealthLabel::AtRisk).unwrap(),
            serde_json::json!("at_risk")
        );
        assert_eq!(HealthLabel::Healthy.as_str(), "healthy");
    }

    #[test]
    fn test_legend_covers_all_labels() {
        let rules = health_rules();
        let keys: Vec<_> = rules.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["healthy", "at_risk", "early"]);
    }
}
