//! Roll-up Analytics Models
//!
//! Typed shapes for the post-processing layer: top/bottom-N rankings and
//! the composite weekly summary across both platforms.

use serde::{Deserialize, Serialize};

use outreach_pulse_core::{DateRange, HealthLabel};

/// Metric a ranking can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    InterestedLeads,
    EmailsSent,
    Replies,
    ReplyRate,
}

impl RankMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankMetric::InterestedLeads => "interested_leads",
            RankMetric::EmailsSent => "emails_sent",
            RankMetric::Replies => "replies",
            RankMetric::ReplyRate => "reply_rate",
        }
    }
}

impl std::str::FromStr for RankMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interested_leads" => Ok(RankMetric::InterestedLeads),
            "emails_sent" => Ok(RankMetric::EmailsSent),
            "replies" => Ok(RankMetric::Replies),
            "reply_rate" => Ok(RankMetric::ReplyRate),
            other => Err(format!("unknown rank metric: {other}")),
        }
    }
}

/// Ranking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDirection {
    Top,
    Bottom,
}

/// One row of a ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedWorkspace {
    pub rank: usize,
    pub workspace_id: String,
    pub workspace_name: String,
    pub emails_sent: i64,
    pub replies: i64,
    pub opportunities: i64,
    pub interested_leads: i64,
    pub reply_rate: f64,
    pub health: HealthLabel,
}

/// Per-platform slice of the weekly summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    pub platform: String,
    pub workspace_count: usize,
    pub failed_count: usize,
    pub emails_sent: i64,
    pub replies: i64,
    pub opportunities: i64,
    pub reply_rate: f64,
    pub at_risk_count: usize,
}

/// Combined totals across all platforms in the summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinedTotals {
    pub workspace_count: usize,
    pub emails_sent: i64,
    pub replies: i64,
    pub opportunities: i64,
    pub reply_rate: f64,
}

/// Composite report over both platforms' run results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    #[serde(flatten)]
    pub date_range: DateRange,
    pub combined: CombinedTotals,
    pub platforms: Vec<PlatformBreakdown>,
    /// Plain comparative observations, newest-reader friendly. No
    /// statistical modeling.
    pub insights: Vec<String>,
}
