//! Interested-Lead Post-processing
//!
//! Turns the raw interested-reply listing from the platform adapter into a
//! clean lead list: drops internal and automated senders, summarizes reply
//! bodies, de-duplicates per sender keeping the most recent reply, and
//! sorts newest first.

use serde::{Deserialize, Serialize};

use outreach_pulse_platforms::ReplyEmail;

/// Cap on reply summaries.
const SUMMARY_MAX_LEN: usize = 200;

/// Sender substrings that always mark an automated mailbox.
const AUTOMATED_SENDER_MARKERS: [&str; 2] = ["noreply", "no-reply"];

/// One cleaned-up interested lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestedLead {
    pub email: String,
    pub reply_summary: String,
    pub reply_body: String,
    pub subject: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Sender filtering configuration.
///
/// `team_keywords` drops replies from the sending team's own domains and
/// aliases (they show up in interested threads); automated mailboxes are
/// always dropped.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub team_keywords: Vec<String>,
}

impl LeadFilter {
    pub fn with_team_keywords(keywords: Vec<String>) -> Self {
        Self {
            team_keywords: keywords,
        }
    }

    fn keeps(&self, sender: &str) -> bool {
        let sender = sender.to_lowercase();
        if sender.is_empty() {
            return false;
        }
        if AUTOMATED_SENDER_MARKERS.iter().any(|m| sender.contains(m)) {
            return false;
        }
        !self
            .team_keywords
            .iter()
            .any(|kw| !kw.is_empty() && sender.contains(&kw.to_lowercase()))
    }
}

/// Build the lead list from raw received replies.
pub fn collect_interested(replies: Vec<ReplyEmail>, filter: &LeadFilter) -> Vec<InterestedLead> {
    let leads = replies
        .into_iter()
        .filter_map(|email| {
            let sender = email.from_address_email.clone().unwrap_or_default();
            if !filter.keeps(&sender) {
                return None;
            }
            let body = email.body_text().to_string();
            Some(InterestedLead {
                reply_summary: summarize_reply(&body, SUMMARY_MAX_LEN),
                reply_body: body,
                subject: email.subject.clone().unwrap_or_default(),
                timestamp: email.timestamp_email.clone().unwrap_or_default(),
                lead_id: email.lead_id.clone(),
                thread_id: email.thread_id.clone(),
                email: sender,
            })
        })
        .collect();

    dedup_latest(leads)
}

/// Keep only the most recent reply per sender, sorted newest first.
/// Timestamps are RFC3339 strings, so lexicographic order is time order.
pub fn dedup_latest(leads: Vec<InterestedLead>) -> Vec<InterestedLead> {
    let mut by_email: std::collections::HashMap<String, InterestedLead> =
        std::collections::HashMap::new();

    for lead in leads {
        match by_email.get(&lead.email) {
            Some(existing) if existing.timestamp >= lead.timestamp => {}
            _ => {
                by_email.insert(lead.email.clone(), lead);
            }
        }
    }

    let mut unique: Vec<InterestedLead> = by_email.into_values().collect();
    unique.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    unique
}

/// Take the first meaningful part of a reply: strip quoted text and
/// signatures by separator heuristics, flag auto-replies, keep the first
/// three substantial lines, cap the length.
pub fn summarize_reply(body: &str, max_length: usize) -> String {
    const MISSING: &str = "[Reply content not available]";

    if body.trim().is_empty() {
        return MISSING.to_string();
    }

    let separators = [
        "\n\nOn ",      // Gmail quote header
        "\n\nFrom:",    // Outlook quote header
        "\n\n---",      // signature rule
        "\nSent from",  // mobile signature
        "\n\n\n",       // blank run before a signature
    ];

    let mut clean = body.trim().to_string();
    for sep in separators {
        if let Some((head, _)) = clean.split_once(sep) {
            clean = head.trim().to_string();
        }
    }

    let lowered = clean.to_lowercase();
    if lowered.starts_with("out of office") || lowered.starts_with("automatic reply") {
        return "[Auto-reply: Out of office]".to_string();
    }

    let lines: Vec<&str> = clean.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let meaningful: Vec<&str> = lines.iter().copied().filter(|l| l.len() > 10).collect();

    let mut summary = if meaningful.is_empty() {
        lines[..lines.len().min(3)].join(" ")
    } else {
        meaningful[..meaningful.len().min(3)].join(" ")
    };

    if summary.len() > max_length {
        let cut = summary
            .char_indices()
            .take_while(|(i, _)| *i <= max_length)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        summary.truncate(cut);
        summary.push_str("...");
    }

    let summary = summary.trim().to_string();
    if summary.is_empty() {
        MISSING.to_string()
    } else {
        summary
    }
}
