//! Project event timeline.

use std::fmt;

use chrono::{DateTime, Utc};
use risk_core::types::{RiskId, RiskLevel, RiskRecord};

/// Characters of the description quoted in an entry.
const EXCERPT_CHARS: usize = 50;

/// Kind of timeline event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimelineEvent {
    /// The record was created
    Created,
    /// Mitigation was implemented
    Mitigated,
}

impl TimelineEvent {
    /// Lowercase event name.
    pub fn name(&self) -> &'static str {
        match self {
            TimelineEvent::Created => "created",
            TimelineEvent::Mitigated => "mitigated",
        }
    }
}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dated event on a project's timeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEntry {
    /// When the event happened
    pub date: DateTime<Utc>,
    /// Record the event belongs to
    pub risk_id: RiskId,
    /// Event kind
    pub event: TimelineEvent,
    /// Human-readable text
    pub description: String,
    /// Score level for creation, residual level for mitigation
    pub risk_level: RiskLevel,
}

fn excerpt(prefix: &str, description: &str) -> String {
    let head: String = description.chars().take(EXCERPT_CHARS).collect();
    format!("{prefix}: {head}...")
}

/// Builds the timeline of `records`, keeping the `limit` most recent entries.
///
/// One `Created` entry per record and one `Mitigated` entry per record with
/// a mitigation date. Entries are sorted oldest first; ties keep creation
/// entries (in creation order) ahead of mitigation entries.
pub fn build_timeline<'a, I>(records: I, limit: usize) -> Vec<TimelineEntry>
where
    I: IntoIterator<Item = &'a RiskRecord>,
{
    let mut by_creation: Vec<&RiskRecord> = records.into_iter().collect();
    by_creation.sort_by_key(|record| record.created_at);

    let mut entries: Vec<TimelineEntry> = by_creation
        .iter()
        .map(|record| TimelineEntry {
            date: record.created_at,
            risk_id: record.id.clone(),
            event: TimelineEvent::Created,
            description: excerpt("Risk created", &record.description),
            risk_level: record.risk_level(),
        })
        .collect();

    entries.extend(by_creation.iter().filter_map(|record| {
        record.mitigation_date.map(|date| TimelineEntry {
            date,
            risk_id: record.id.clone(),
            event: TimelineEvent::Mitigated,
            description: excerpt("Risk mitigated", &record.description),
            risk_level: record.residual_risk_level(),
        })
    }));

    entries.sort_by_key(|entry| entry.date);

    let skip = entries.len().saturating_sub(limit);
    entries.split_off(skip)
}
