//! Register-wide summary.

use std::collections::BTreeMap;

use risk_core::types::{RiskLevel, RiskRecord, RiskStatus};

/// Counts over a whole register.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskSummary {
    /// Number of records
    pub total: usize,
    /// Records per level; every level is present, unused ones with 0
    pub by_level: BTreeMap<RiskLevel, usize>,
    /// Records per status; only statuses that occur
    pub by_status: BTreeMap<RiskStatus, usize>,
    /// Records per project; records without a project are not counted
    pub by_project: BTreeMap<String, usize>,
}

impl RiskSummary {
    /// Count for `level`.
    pub fn level_count(&self, level: RiskLevel) -> usize {
        self.by_level.get(&level).copied().unwrap_or(0)
    }

    /// Count for `status`.
    pub fn status_count(&self, status: RiskStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Summarises `records` by level, status and project.
pub fn summarize(records: &[RiskRecord]) -> RiskSummary {
    let mut by_level: BTreeMap<RiskLevel, usize> =
        RiskLevel::ALL.iter().map(|level| (*level, 0)).collect();
    let mut by_status = BTreeMap::new();
    let mut by_project = BTreeMap::new();

    for record in records {
        *by_level.entry(record.risk_level()).or_insert(0) += 1;
        *by_status.entry(record.status).or_insert(0) += 1;
        if let Some(project) = &record.project {
            *by_project.entry(project.clone()).or_insert(0) += 1;
        }
    }

    RiskSummary {
        total: records.len(),
        by_level,
        by_status,
        by_project,
    }
}
