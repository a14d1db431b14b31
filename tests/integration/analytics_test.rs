//! Roll-up Analytics Tests
//!
//! Rankings and the weekly summary computed over real run results.

use outreach_pulse::models::{RankDirection, RankMetric};
use outreach_pulse::services::analytics::{rank, weekly_summary, PlatformRun};
use outreach_pulse::services::run::RunCoordinator;
use outreach_pulse_core::{DateRange, Reduction};

use crate::support::{aggregator, metrics, roster_entry, Script, ScriptedPlatform};

fn sent(n: i64) -> Script {
    Script::Partitions(vec![metrics(&[
        ("emails_sent_count", n),
        ("reply_count_unique", n / 100),
    ])])
}

#[tokio::test]
async fn test_top_ranking_over_run_result() {
    let platform = ScriptedPlatform::new(Reduction::Max)
        .with_script("tok-a", sent(3000))
        .with_script("tok-b", sent(1000))
        .with_script("tok-c", sent(2000));

    let result = RunCoordinator::new(aggregator(platform))
        .run(
            &[
                roster_entry("a", "tok-a"),
                roster_entry("b", "tok-b"),
                roster_entry("c", "tok-c"),
            ],
            &DateRange::year_to_date(),
        )
        .await;

    let top = rank(&result.summaries, RankMetric::EmailsSent, RankDirection::Top, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].rank, 1);
    assert_eq!(top[0].emails_sent, 3000);
    assert_eq!(top[1].emails_sent, 2000);

    let bottom = rank(
        &result.summaries,
        RankMetric::EmailsSent,
        RankDirection::Bottom,
        1,
    );
    assert_eq!(bottom[0].emails_sent, 1000);
}

#[tokio::test]
async fn test_weekly_summary_combines_platform_runs() {
    let range = DateRange::year_to_date();

    let instantly = ScriptedPlatform::new(Reduction::Max).with_script("tok-i", sent(4000));
    let instantly_run = RunCoordinator::new(aggregator(instantly))
        .run(&[roster_entry("i", "tok-i")], &range)
        .await;

    let smartlead = ScriptedPlatform::new(Reduction::Sum)
        .with_script("tok-s", sent(1000))
        .with_script("tok-broken", Script::Broken(401));
    let smartlead_run = RunCoordinator::new(aggregator(smartlead))
        .run(
            &[
                roster_entry("s", "tok-s"),
                roster_entry("broken", "tok-broken"),
            ],
            &range,
        )
        .await;

    let report = weekly_summary(&[
        PlatformRun {
            platform: "instantly",
            result: &instantly_run,
        },
        PlatformRun {
            platform: "smartlead",
            result: &smartlead_run,
        },
    ]);

    assert_eq!(report.combined.emails_sent, 5000);
    assert_eq!(report.combined.workspace_count, 3);
    assert_eq!(report.platforms.len(), 2);
    let smartlead_breakdown = report
        .platforms
        .iter()
        .find(|p| p.platform == "smartlead")
        .unwrap();
    assert_eq!(smartlead_breakdown.failed_count, 1);
    assert!(!report.insights.is_empty());
}
