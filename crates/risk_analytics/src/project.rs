//! Per-project rollups.
//!
//! [`RiskAnalyzer`] holds an [`AnalyticsPolicy`] and produces a
//! [`ProjectRiskSummary`] (counts, average score, trend, profitability,
//! timeline) or a [`ProjectAnalytics`] (the summary plus financial totals)
//! for each project in a register.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use risk_core::scoring::round_to_tenth;
use risk_core::types::RiskRecord;

use crate::financial::{financial_impact, potential_savings, ImpactCategory};
use crate::policy::AnalyticsPolicy;
use crate::summary::{summarize, RiskSummary};
use crate::timeline::{build_timeline, TimelineEntry};

/// Creation-rate trend of a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RiskTrend {
    /// Many records created recently
    Increasing,
    /// Neither increasing nor decreasing
    Stable,
    /// Few records created recently
    Decreasing,
}

impl RiskTrend {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            RiskTrend::Increasing => "increasing",
            RiskTrend::Stable => "stable",
            RiskTrend::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected impact of a project's risks on its profitability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProfitabilityImpact {
    /// Neither medium nor high
    Low,
    /// Some high risks or a moderate average score
    Medium,
    /// Many high risks or a high average score
    High,
}

impl ProfitabilityImpact {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ProfitabilityImpact::Low => "low",
            ProfitabilityImpact::Medium => "medium",
            ProfitabilityImpact::High => "high",
        }
    }
}

impl fmt::Display for ProfitabilityImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregates over the records of one project.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectRiskSummary {
    /// Project name
    pub project_name: String,
    /// Records in the project
    pub total_risks: usize,
    /// Records at a high-risk level
    pub high_risks: usize,
    /// Open or In Progress records
    pub open_risks: usize,
    /// Mitigated or Closed records
    pub mitigated_risks: usize,
    /// Mean score rounded to one decimal; 0 for an empty project
    pub average_score: f64,
    /// Creation-rate trend
    pub risk_trend: RiskTrend,
    /// Expected profitability impact
    pub expected_profitability_impact: ProfitabilityImpact,
    /// Most recent events, oldest first
    pub timeline: Vec<TimelineEntry>,
}

/// A project summary with financial totals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectAnalytics {
    /// Risk counts, trend and timeline
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: ProjectRiskSummary,
    /// Sum of the financial impact of every record
    pub total_financial_impact: f64,
    /// Savings realised by resolved records
    pub potential_savings: f64,
    /// Category of `total_financial_impact`
    pub impact_category: ImpactCategory,
}

/// Distinct project names in order of first appearance.
pub fn project_names(records: &[RiskRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| record.project.as_deref())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Aggregation engine configured by an [`AnalyticsPolicy`].
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use risk_analytics::{ProfitabilityImpact, RiskAnalyzer, RiskTrend};
///
/// let analyzer = RiskAnalyzer::default();
/// let empty = analyzer.summarize_project(&[], "Solar", Utc::now());
/// assert_eq!(empty.total_risks, 0);
/// assert_eq!(empty.average_score, 0.0);
/// assert_eq!(empty.risk_trend, RiskTrend::Stable);
/// assert_eq!(empty.expected_profitability_impact, ProfitabilityImpact::Low);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RiskAnalyzer {
    policy: AnalyticsPolicy,
}

impl RiskAnalyzer {
    /// Creates an analyzer with the given thresholds.
    pub fn new(policy: AnalyticsPolicy) -> Self {
        Self { policy }
    }

    /// The thresholds in use.
    pub fn policy(&self) -> &AnalyticsPolicy {
        &self.policy
    }

    /// Register-wide counts.
    pub fn summarize(&self, records: &[RiskRecord]) -> RiskSummary {
        summarize(records)
    }

    /// Trend from the number of recently created records out of `total`.
    pub fn classify_trend(&self, recent: usize, total: usize) -> RiskTrend {
        let trend = &self.policy.trend;
        let recent = recent as f64;
        let total = total as f64;
        if recent > total * trend.increasing_ratio {
            RiskTrend::Increasing
        } else if recent < total * trend.decreasing_ratio {
            RiskTrend::Decreasing
        } else {
            RiskTrend::Stable
        }
    }

    /// Profitability impact; the high conditions are checked first.
    pub fn classify_profitability(&self, high_risks: usize, average_score: f64) -> ProfitabilityImpact {
        let rules = &self.policy.profitability;
        if high_risks > rules.high_risk_count_for_high || average_score > rules.average_score_for_high
        {
            ProfitabilityImpact::High
        } else if high_risks > rules.high_risk_count_for_medium
            || average_score > rules.average_score_for_medium
        {
            ProfitabilityImpact::Medium
        } else {
            ProfitabilityImpact::Low
        }
    }

    /// Summarises the records whose project equals `project`.
    ///
    /// The trend counts records created after `as_of − window`.
    pub fn summarize_project(
        &self,
        records: &[RiskRecord],
        project: &str,
        as_of: DateTime<Utc>,
    ) -> ProjectRiskSummary {
        let members: Vec<&RiskRecord> = records
            .iter()
            .filter(|record| record.project.as_deref() == Some(project))
            .collect();
        let total = members.len();

        let high_risks = members
            .iter()
            .filter(|record| self.policy.is_high_risk(record.risk_level()))
            .count();
        let open_risks = members.iter().filter(|record| record.status.is_active()).count();
        let mitigated_risks = members
            .iter()
            .filter(|record| record.status.is_resolved())
            .count();

        // Profitability reads the unrounded mean
        let mean_score = if total == 0 {
            0.0
        } else {
            let sum: u32 = members.iter().map(|record| u32::from(record.score())).sum();
            f64::from(sum) / total as f64
        };

        let window_start = as_of - Duration::days(self.policy.trend.window_days);
        let recent = members
            .iter()
            .filter(|record| record.created_at > window_start)
            .count();

        ProjectRiskSummary {
            project_name: project.to_string(),
            total_risks: total,
            high_risks,
            open_risks,
            mitigated_risks,
            average_score: round_to_tenth(mean_score),
            risk_trend: self.classify_trend(recent, total),
            expected_profitability_impact: self.classify_profitability(high_risks, mean_score),
            timeline: build_timeline(members.iter().copied(), self.policy.timeline_length),
        }
    }

    /// Project summary plus financial totals for `project`.
    pub fn analyze_project(
        &self,
        records: &[RiskRecord],
        project: &str,
        as_of: DateTime<Utc>,
    ) -> ProjectAnalytics {
        let summary = self.summarize_project(records, project, as_of);
        let financial = &self.policy.financial;

        let members = records
            .iter()
            .filter(|record| record.project.as_deref() == Some(project));
        let (total_financial_impact, savings) =
            members.fold((0.0, 0.0), |(impact, savings), record| {
                (
                    impact + financial_impact(record, financial),
                    savings + potential_savings(record, financial),
                )
            });

        ProjectAnalytics {
            summary,
            total_financial_impact,
            potential_savings: savings,
            impact_category: ImpactCategory::classify(total_financial_impact, financial),
        }
    }

    /// Analytics for every project, in order of first appearance.
    pub fn analyze_projects(&self, records: &[RiskRecord], as_of: DateTime<Utc>) -> Vec<ProjectAnalytics> {
        project_names(records)
            .iter()
            .map(|project| self.analyze_project(records, project, as_of))
            .collect()
    }
}
