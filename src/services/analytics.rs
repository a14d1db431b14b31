//! Roll-up Analytics
//!
//! Pure post-processing over completed run results: top/bottom-N rankings
//! by a selectable metric, and the composite weekly summary combining both
//! platforms' runs into combined totals, a per-platform breakdown, and
//! plain comparative insight strings.

use outreach_pulse_core::HealthLabel;

use crate::models::{
    CombinedTotals, PlatformBreakdown, RankDirection, RankMetric, RankedWorkspace, RunResult,
    WeeklySummary, WorkspaceSummary,
};

/// One platform's run result, labeled for the weekly summary.
pub struct PlatformRun<'a> {
    pub platform: &'a str,
    pub result: &'a RunResult,
}

fn ranked_row(summary: &WorkspaceSummary) -> RankedWorkspace {
    RankedWorkspace {
        rank: 0,
        workspace_id: summary.identity.canonical_id.clone(),
        workspace_name: summary.identity.display_name.clone(),
        emails_sent: summary.emails_sent,
        replies: summary.replies,
        opportunities: summary.opportunities,
        interested_leads: summary.metrics.interested(),
        reply_rate: summary.metrics.reply_rate(),
        health: summary.health,
    }
}

fn metric_value(row: &RankedWorkspace, metric: RankMetric) -> f64 {
    match metric {
        RankMetric::InterestedLeads => row.interested_leads as f64,
        RankMetric::EmailsSent => row.emails_sent as f64,
        RankMetric::Replies => row.replies as f64,
        RankMetric::ReplyRate => row.reply_rate,
    }
}

/// Rank workspaces by a metric. Ties keep a stable order (by workspace
/// name) so repeated runs agree.
pub fn rank(
    summaries: &[WorkspaceSummary],
    metric: RankMetric,
    direction: RankDirection,
    n: usize,
) -> Vec<RankedWorkspace> {
    let mut rows: Vec<RankedWorkspace> = summaries.iter().map(ranked_row).collect();

    rows.sort_by(|a, b| {
        let by_metric = metric_value(a, metric)
            .partial_cmp(&metric_value(b, metric))
            .unwrap_or(std::cmp::Ordering::Equal);
        let by_metric = match direction {
            RankDirection::Top => by_metric.reverse(),
            RankDirection::Bottom => by_metric,
        };
        by_metric.then_with(|| a.workspace_name.cmp(&b.workspace_name))
    });

    rows.truncate(n);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

fn breakdown(run: &PlatformRun) -> PlatformBreakdown {
    let result = run.result;
    let emails_sent = result.totals.emails_sent();
    let replies = result.totals.replies();
    let at_risk_count = result
        .summaries
        .iter()
        .filter(|s| s.health == HealthLabel::AtRisk)
        .count();

    PlatformBreakdown {
        platform: run.platform.to_string(),
        workspace_count: result.workspace_count,
        failed_count: result.failed_count(),
        emails_sent,
        replies,
        opportunities: result.totals.opportunities(),
        reply_rate: percentage(replies, emails_sent),
        at_risk_count,
    }
}

fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Build the composite weekly summary from both platforms' runs.
///
/// Both runs are expected to cover the same date range; the first run's
/// range labels the report.
pub fn weekly_summary(runs: &[PlatformRun]) -> WeeklySummary {
    let platforms: Vec<PlatformBreakdown> = runs.iter().map(breakdown).collect();

    let mut combined = CombinedTotals::default();
    for p in &platforms {
        combined.workspace_count += p.workspace_count;
        combined.emails_sent += p.emails_sent;
        combined.replies += p.replies;
        combined.opportunities += p.opportunities;
    }
    combined.reply_rate = percentage(combined.replies, combined.emails_sent);

    let mut insights = Vec::new();
    insights.push(format!(
        "{} emails sent across {} workspaces this period.",
        combined.emails_sent, combined.workspace_count
    ));

    if let Some(busiest) = platforms
        .iter()
        .filter(|p| p.emails_sent > 0)
        .max_by_key(|p| p.emails_sent)
    {
        if platforms.len() > 1 {
            insights.push(format!(
                "{} drove the most volume with {} of {} total sends.",
                busiest.platform, busiest.emails_sent, combined.emails_sent
            ));
        }
    }

    if combined.emails_sent > 0 {
        insights.push(format!(
            "Overall reply rate was {:.2}% ({} unique replies).",
            combined.reply_rate, combined.replies
        ));
    }

    let at_risk: usize = platforms.iter().map(|p| p.at_risk_count).sum();
    if at_risk > 0 {
        insights.push(format!(
            "{at_risk} workspace(s) are at risk: high send volume with zero opportunities."
        ));
    }

    let failed: usize = platforms.iter().map(|p| p.failed_count).sum();
    if failed > 0 {
        insights.push(format!(
            "{failed} workspace(s) could not be aggregated this period."
        ));
    }

    let date_range = runs
        .first()
        .map(|r| r.result.date_range)
        .unwrap_or_else(outreach_pulse_core::DateRange::year_to_date);

    WeeklySummary {
        date_range,
        combined,
        platforms,
        insights,
    }
}
