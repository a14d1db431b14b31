//! Run Coordinator Tests
//!
//! Roster-wide behavior: totals over the summaries present, failure
//! isolation, and count semantics when some workspaces break entirely.

use outreach_pulse::services::run::{RunConfig, RunCoordinator};
use outreach_pulse_core::{DateRange, Reduction};

use crate::support::{aggregator, metrics, roster_entry, Script, ScriptedPlatform};

#[tokio::test]
async fn test_totals_sum_over_all_summaries() {
    let platform = ScriptedPlatform::new(Reduction::Max)
        .with_script(
            "tok-a",
            Script::Partitions(vec![metrics(&[
                ("emails_sent_count", 2500),
                ("reply_count_unique", 20),
            ])]),
        )
        .with_script(
            "tok-b",
            Script::Partitions(vec![metrics(&[
                ("emails_sent_count", 1000),
                ("reply_count_unique", 7),
            ])]),
        );

    let coordinator = RunCoordinator::new(aggregator(platform));
    let result = coordinator
        .run(
            &[roster_entry("acme", "tok-a"), roster_entry("borealis", "tok-b")],
            &DateRange::year_to_date(),
        )
        .await;

    assert_eq!(result.workspace_count, 2);
    assert_eq!(result.summaries.len(), 2);
    assert!(result.failures.is_empty());
    assert_eq!(result.totals.emails_sent(), 3500);
    assert_eq!(result.totals.replies(), 27);
}

#[tokio::test]
async fn test_broken_workspace_is_reported_not_zero_filled() {
    let platform = ScriptedPlatform::new(Reduction::Max)
        .with_script(
            "tok-good",
            Script::Partitions(vec![metrics(&[("emails_sent_count", 500)])]),
        )
        .with_script("tok-bad", Script::Broken(401));

    let coordinator = RunCoordinator::new(aggregator(platform));
    let result = coordinator
        .run(
            &[
                roster_entry("good", "tok-good"),
                roster_entry("bad", "tok-bad"),
            ],
            &DateRange::year_to_date(),
        )
        .await;

    // The broken workspace appears in failures only: not in summaries,
    // not in totals, but still counted in the roster size.
    assert_eq!(result.workspace_count, 2);
    assert_eq!(result.summaries.len(), 1);
    assert_eq!(result.failed_count(), 1);
    assert_eq!(result.failures[0].label, "bad");
    assert_eq!(result.totals.emails_sent(), 500);
}

#[tokio::test]
async fn test_all_workspaces_broken_yields_empty_totals() {
    let platform = ScriptedPlatform::new(Reduction::Max)
        .with_script("tok-x", Script::Broken(403))
        .with_script("tok-y", Script::Broken(500));

    let coordinator = RunCoordinator::new(aggregator(platform))
        .with_config(RunConfig { max_concurrent: 1 });
    let result = coordinator
        .run(
            &[roster_entry("x", "tok-x"), roster_entry("y", "tok-y")],
            &DateRange::year_to_date(),
        )
        .await;

    assert_eq!(result.workspace_count, 2);
    assert!(result.summaries.is_empty());
    assert_eq!(result.failed_count(), 2);
    assert!(result.totals.is_empty());
}

#[tokio::test]
async fn test_summaries_keep_roster_order() {
    let platform = ScriptedPlatform::new(Reduction::Max)
        .with_script(
            "tok-1",
            Script::Partitions(vec![metrics(&[("emails_sent_count", 1)])]),
        )
        .with_script(
            "tok-2",
            Script::Partitions(vec![metrics(&[("emails_sent_count", 2)])]),
        )
        .with_script(
            "tok-3",
            Script::Partitions(vec![metrics(&[("emails_sent_count", 3)])]),
        );

    let coordinator = RunCoordinator::new(aggregator(platform));
    let result = coordinator
        .run(
            &[
                roster_entry("one", "tok-1"),
                roster_entry("two", "tok-2"),
                roster_entry("three", "tok-3"),
            ],
            &DateRange::year_to_date(),
        )
        .await;

    let labels: Vec<&str> = result.summaries.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["one", "two", "three"]);
}
