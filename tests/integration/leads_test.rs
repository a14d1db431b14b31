//! Interested-Lead Pipeline Tests
//!
//! From raw unibox emails through filtering, summarization, and
//! de-duplication to the final lead list.

use outreach_pulse::services::leads::{collect_interested, dedup_latest, LeadFilter};
use outreach_pulse_platforms::{ReplyBody, ReplyEmail};

fn reply(from: &str, body: &str, timestamp: &str) -> ReplyEmail {
    ReplyEmail {
        ue_type: Some(2),
        from_address_email: Some(from.to_string()),
        subject: Some("Re: quick question".to_string()),
        body: Some(ReplyBody {
            text: Some(body.to_string()),
        }),
        timestamp_email: Some(timestamp.to_string()),
        lead_id: Some("lead-1".to_string()),
        thread_id: Some("thread-1".to_string()),
    }
}

#[test]
fn test_pipeline_filters_summarizes_and_dedups() {
    let filter = LeadFilter::with_team_keywords(vec!["ourdomain.com".to_string()]);
    let replies = vec![
        reply(
            "alice@prospect.io",
            "Sounds interesting, send me a deck.\n\nOn Mon, Jan 5, someone wrote:\n> original",
            "2026-01-06T10:00:00Z",
        ),
        reply("alice@prospect.io", "Following up again.", "2026-01-08T09:00:00Z"),
        reply("sales@ourdomain.com", "internal reply", "2026-01-07T08:00:00Z"),
        reply("noreply@system.io", "automated notice", "2026-01-07T08:30:00Z"),
    ];

    let leads = dedup_latest(collect_interested(replies, &filter));

    // One lead: the team and automated senders are dropped, and Alice's
    // two replies collapse to her most recent one.
    assert_eq!(leads.len(), 1);
    let lead = &leads[0];
    assert_eq!(lead.email, "alice@prospect.io");
    assert_eq!(lead.timestamp, "2026-01-08T09:00:00Z");
    assert_eq!(lead.reply_summary, "Following up again.");
}

#[test]
fn test_quoted_thread_stripped_from_summary() {
    let filter = LeadFilter::default();
    let replies = vec![reply(
        "bob@prospect.io",
        "Yes, let's talk next week.\n\nOn Tue, Jan 6, someone wrote:\n> earlier message",
        "2026-01-07T12:00:00Z",
    )];

    let leads = collect_interested(replies, &filter);
    assert_eq!(leads[0].reply_summary, "Yes, let's talk next week.");
    // The raw body is preserved alongside the summary.
    assert!(leads[0].reply_body.contains("earlier message"));
}

#[test]
fn test_leads_sorted_newest_first() {
    let filter = LeadFilter::default();
    let replies = vec![
        reply("old@prospect.io", "reply one", "2026-01-01T00:00:00Z"),
        reply("new@prospect.io", "reply two", "2026-02-01T00:00:00Z"),
        reply("mid@prospect.io", "reply three", "2026-01-15T00:00:00Z"),
    ];

    let leads = dedup_latest(collect_interested(replies, &filter));
    let order: Vec<&str> = leads.iter().map(|l| l.email.as_str()).collect();
    assert_eq!(order, ["new@prospect.io", "mid@prospect.io", "old@prospect.io"]);
}
