//! Register queries: filtering and sorting.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use risk_core::types::{RiskLevel, RiskRecord, RiskStatus};

/// Field a query sorts by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Risk score
    #[default]
    Score,
    /// Residual score
    ResidualScore,
    /// Probability rating
    Probability,
    /// Impact rating
    Impact,
    /// Description text
    Description,
    /// Status, in lifecycle order
    Status,
    /// Creation time
    CreatedAt,
    /// Last update time
    UpdatedAt,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    #[default]
    Descending,
}

/// Filter and sort over a register.
///
/// Every filter is optional; an unset filter matches all records. The
/// default query sorts by score, highest first.
///
/// # Examples
///
/// ```
/// use infra_store::{RiskQuery, SortDirection, SortField};
/// use risk_core::types::RiskStatus;
///
/// let query = RiskQuery::new()
///     .status(RiskStatus::Open)
///     .project("Solar")
///     .sort_by(SortField::CreatedAt, SortDirection::Ascending);
/// assert_eq!(query.sort_field, SortField::CreatedAt);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskQuery {
    /// Only records at this level
    pub level: Option<RiskLevel>,
    /// Only records with this status
    pub status: Option<RiskStatus>,
    /// Only records in this category
    pub category: Option<String>,
    /// Only records in this project
    pub project: Option<String>,
    /// Sort key
    pub sort_field: SortField,
    /// Sort direction
    pub direction: SortDirection,
}

impl RiskQuery {
    /// Query matching everything, score descending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by level.
    pub fn level(mut self, level: RiskLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Filters by status.
    pub fn status(mut self, status: RiskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters by category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters by project.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the sort order.
    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.direction = direction;
        self
    }

    /// Whether `record` passes every filter.
    pub fn matches(&self, record: &RiskRecord) -> bool {
        self.level.map_or(true, |level| record.risk_level() == level)
            && self.status.map_or(true, |status| record.status == status)
            && self
                .category
                .as_deref()
                .map_or(true, |category| record.category.as_deref() == Some(category))
            && self
                .project
                .as_deref()
                .map_or(true, |project| record.project.as_deref() == Some(project))
    }

    /// Matching records in sorted order. The sort is stable.
    pub fn apply<'a>(&self, records: &'a [RiskRecord]) -> Vec<&'a RiskRecord> {
        let mut matching: Vec<&RiskRecord> =
            records.iter().filter(|record| self.matches(record)).collect();
        matching.sort_by(|a, b| {
            let ordering = compare(self.sort_field, a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        matching
    }
}

fn compare(field: SortField, a: &RiskRecord, b: &RiskRecord) -> Ordering {
    match field {
        SortField::Score => a.score().cmp(&b.score()),
        SortField::ResidualScore => a.residual_score().total_cmp(&b.residual_score()),
        SortField::Probability => a.probability().cmp(&b.probability()),
        SortField::Impact => a.impact().cmp(&b.impact()),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Status => a.status.cmp(&b.status),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// Distinct categories, sorted.
pub fn categories(records: &[RiskRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|record| record.category.as_deref()))
}

/// Distinct projects, sorted.
pub fn projects(records: &[RiskRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|record| record.project.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
