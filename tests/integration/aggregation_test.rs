//! Per-workspace Aggregation Tests
//!
//! Exercises the full path from partition queries through reduction to a
//! classified summary, for both merge modes.

use outreach_pulse_core::{DateRange, HealthLabel, Reduction};

use crate::support::{aggregator, metrics, roster_entry, Script, ScriptedPlatform};

#[tokio::test]
async fn test_max_merge_takes_elementwise_maximum() {
    // Overlapping status filters each report a snapshot of the same
    // workspace; the aggregate takes the per-key maximum, never the sum.
    let platform = ScriptedPlatform::new(Reduction::Max).with_script(
        "tok-a",
        Script::Partitions(vec![
            metrics(&[
                ("emails_sent_count", 1200),
                ("reply_count_unique", 40),
                ("total_opportunities", 3),
            ]),
            metrics(&[
                ("emails_sent_count", 2500),
                ("reply_count_unique", 35),
                ("total_opportunities", 5),
            ]),
            metrics(&[("emails_sent_count", 900), ("reply_count_unique", 44)]),
        ]),
    );

    let aggregator = aggregator(platform);
    let summary = aggregator
        .aggregate(&roster_entry("acme", "tok-a"), &DateRange::year_to_date())
        .await
        .unwrap();

    assert_eq!(summary.emails_sent, 2500);
    assert_eq!(summary.replies, 44);
    assert_eq!(summary.opportunities, 5);
    assert_eq!(summary.health, HealthLabel::Healthy);
    assert_eq!(summary.identity.display_name, "Workspace tok-a");
}

#[tokio::test]
async fn test_sum_merge_adds_disjoint_campaigns() {
    let platform = ScriptedPlatform::new(Reduction::Sum).with_script(
        "tok-b",
        Script::Partitions(vec![
            metrics(&[("emails_sent_count", 800), ("reply_count_unique", 10)]),
            metrics(&[("emails_sent_count", 700), ("reply_count_unique", 5)]),
        ]),
    );

    let summary = aggregator(platform)
        .aggregate(&roster_entry("borealis", "tok-b"), &DateRange::year_to_date())
        .await
        .unwrap();

    assert_eq!(summary.emails_sent, 1500);
    assert_eq!(summary.replies, 15);
    // 1500 < 2000: still ramping up regardless of opportunities.
    assert_eq!(summary.health, HealthLabel::Early);
}

#[tokio::test]
async fn test_volume_without_opportunities_is_at_risk() {
    let platform = ScriptedPlatform::new(Reduction::Max).with_script(
        "tok-c",
        Script::Partitions(vec![metrics(&[
            ("emails_sent_count", 2500),
            ("reply_count_unique", 12),
            ("total_opportunities", 0),
        ])]),
    );

    let summary = aggregator(platform)
        .aggregate(&roster_entry("corvid", "tok-c"), &DateRange::year_to_date())
        .await
        .unwrap();

    assert_eq!(summary.health, HealthLabel::AtRisk);
}

#[tokio::test]
async fn test_no_partitions_yields_empty_early_summary() {
    let platform =
        ScriptedPlatform::new(Reduction::Max).with_script("tok-d", Script::Partitions(vec![]));

    let summary = aggregator(platform)
        .aggregate(&roster_entry("dune", "tok-d"), &DateRange::year_to_date())
        .await
        .unwrap();

    assert!(summary.metrics.is_empty());
    assert_eq!(summary.emails_sent, 0);
    assert_eq!(summary.health, HealthLabel::Early);
}

#[tokio::test]
async fn test_aggregation_is_idempotent() {
    let platform = ScriptedPlatform::new(Reduction::Max).with_script(
        "tok-e",
        Script::Partitions(vec![
            metrics(&[("emails_sent_count", 100)]),
            metrics(&[("emails_sent_count", 250)]),
        ]),
    );
    let aggregator = aggregator(platform);
    let entry = roster_entry("echo", "tok-e");
    let range = DateRange::year_to_date();

    let first = aggregator.aggregate(&entry, &range).await.unwrap();
    let second = aggregator.aggregate(&entry, &range).await.unwrap();

    assert_eq!(first.emails_sent, second.emails_sent);
    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.health, second.health);
}
