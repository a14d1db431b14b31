//! Reduced Metrics
//!
//! Upstream analytics responses are schemaless JSON objects of metric name
//! to value. This module keeps that dynamic shape — a string-keyed integer
//! map — while giving the consumption boundary typed accessors for the
//! three headline metrics. Missing keys default to zero only at the
//! accessor, never inside the map itself.
//!
//! Two reduction rules merge per-partition maps into one workspace map:
//!
//! - **Max-merge**: partitions are overlapping filtered views of the same
//!   underlying total (campaign-status filters), so the workspace total per
//!   key is the maximum observed value — matching how the upstream's own
//!   dashboard derives it.
//! - **Sum-merge**: partitions are genuinely disjoint units (distinct
//!   campaigns), so values add.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metric key for total emails sent in the range.
pub const EMAILS_SENT_KEY: &str = "emails_sent_count";

/// Metric key for unique replies received.
pub const REPLIES_KEY: &str = "reply_count_unique";

/// Metric key for opportunities generated.
pub const OPPORTUNITIES_KEY: &str = "total_opportunities";

/// Metric key for interested leads (where the upstream reports it).
pub const INTERESTED_KEY: &str = "total_interested";

/// How partition maps merge into a single workspace map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    /// Per-key maximum across partitions (overlapping filtered views).
    Max,
    /// Per-key sum across partitions (disjoint units).
    Sum,
}

/// Per-workspace merged metric map.
///
/// Keys are whatever the upstream returned; only keys reported by at least
/// one partition are present. Ordered (BTreeMap) so serialization and
/// equality are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReducedMetrics {
    values: BTreeMap<String, i64>,
}

impl ReducedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lookup. `None` means no partition reported the key.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Lookup with the zero default applied. Only call this for the named
    /// headline metrics read downstream; everywhere else absence matters.
    pub fn get_or_zero(&self, key: &str) -> i64 {
        self.get(key).unwrap_or(0)
    }

    pub fn emails_sent(&self) -> i64 {
        self.get_or_zero(EMAILS_SENT_KEY)
    }

    pub fn replies(&self) -> i64 {
        self.get_or_zero(REPLIES_KEY)
    }

    pub fn opportunities(&self) -> i64 {
        self.get_or_zero(OPPORTUNITIES_KEY)
    }

    pub fn interested(&self) -> i64 {
        self.get_or_zero(INTERESTED_KEY)
    }

    /// Unique-reply rate as a percentage of sends. Zero when nothing was
    /// sent.
    pub fn reply_rate(&self) -> f64 {
        let sent = self.emails_sent();
        if sent == 0 {
            0.0
        } else {
            self.replies() as f64 / sent as f64 * 100.0
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.values.iter()
    }

    /// Elementwise add, used by the run coordinator to build roster totals.
    pub fn add_assign(&mut self, other: &ReducedMetrics) {
        for (key, value) in &other.values {
            *self.values.entry(key.clone()).or_insert(0) += value;
        }
    }
}

impl FromIterator<(String, i64)> for ReducedMetrics {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Merge partition metric maps into one [`ReducedMetrics`].
///
/// Non-numeric values are skipped. Accumulation happens in f64 (upstream
/// reports mixed ints and floats) and the final value is truncated to i64,
/// matching how the upstream dashboard rounds its totals.
pub fn reduce<'a, I>(partitions: I, mode: Reduction) -> ReducedMetrics
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut acc: BTreeMap<String, f64> = BTreeMap::new();

    for metrics in partitions {
        for (key, value) in metrics {
            let Some(number) = value.as_f64() else {
                continue;
            };
            match mode {
                Reduction::Max => {
                    acc.entry(key.clone())
                        .and_modify(|current| {
                            if number > *current {
                                *current = number;
                            }
                        })
                        .or_insert(number);
                }
                Reduction::Sum => {
                    *acc.entry(key.clone()).or_insert(0.0) += number;
                }
            }
        }
    }

    acc.into_iter().map(|(k, v)| (k, v as i64)).collect()
}
