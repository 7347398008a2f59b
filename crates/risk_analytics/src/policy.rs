//! Classification thresholds.
//!
//! The trend, profitability and financial heuristics are fixed numeric
//! rules; their constants live here so a policy change is a configuration
//! change. [`AnalyticsPolicy::default`] holds the standard thresholds.

use risk_core::types::RiskLevel;

/// All thresholds used by the aggregation engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyticsPolicy {
    /// Levels counted as high risks
    pub high_risk_levels: Vec<RiskLevel>,
    /// Trend heuristic
    pub trend: TrendPolicy,
    /// Profitability heuristic
    pub profitability: ProfitabilityPolicy,
    /// Financial estimate constants
    pub financial: FinancialPolicy,
    /// Number of most recent timeline entries kept
    pub timeline_length: usize,
}

impl Default for AnalyticsPolicy {
    fn default() -> Self {
        Self {
            high_risk_levels: vec![
                RiskLevel::High,
                RiskLevel::VeryHigh,
                RiskLevel::ProceedAtOwnRisk,
            ],
            trend: TrendPolicy::default(),
            profitability: ProfitabilityPolicy::default(),
            financial: FinancialPolicy::default(),
            timeline_length: 10,
        }
    }
}

impl AnalyticsPolicy {
    /// Whether `level` counts as a high risk.
    pub fn is_high_risk(&self, level: RiskLevel) -> bool {
        self.high_risk_levels.contains(&level)
    }
}

/// Creation-rate trend heuristic.
///
/// A project is "increasing" when more than `increasing_ratio` of its
/// records were created inside the trailing window, "decreasing" when
/// fewer than `decreasing_ratio` were.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrendPolicy {
    /// Trailing window length in days
    pub window_days: i64,
    /// Share of recent records above which the trend is increasing
    pub increasing_ratio: f64,
    /// Share of recent records below which the trend is decreasing
    pub decreasing_ratio: f64,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            window_days: 30,
            increasing_ratio: 0.3,
            decreasing_ratio: 0.1,
        }
    }
}

/// Expected profitability impact thresholds. High conditions are checked first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfitabilityPolicy {
    /// High impact when the high-risk count exceeds this
    pub high_risk_count_for_high: usize,
    /// High impact when the average score exceeds this
    pub average_score_for_high: f64,
    /// Medium impact when the high-risk count exceeds this
    pub high_risk_count_for_medium: usize,
    /// Medium impact when the average score exceeds this
    pub average_score_for_medium: f64,
}

impl Default for ProfitabilityPolicy {
    fn default() -> Self {
        Self {
            high_risk_count_for_high: 3,
            average_score_for_high: 15.0,
            high_risk_count_for_medium: 1,
            average_score_for_medium: 8.0,
        }
    }
}

/// Financial estimate constants, in the currency of `dollar_effect_per_unit`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinancialPolicy {
    /// Base project value of the legacy estimate
    pub legacy_base_value: f64,
    /// Per-rating probability factor of the legacy estimate
    pub legacy_probability_factor: f64,
    /// Final scale of the legacy estimate
    pub legacy_scale: f64,
    /// Totals at or above this are high impact
    pub high_impact_threshold: f64,
    /// Totals at or above this are medium impact
    pub medium_impact_threshold: f64,
    /// Effectiveness assumed for potential savings when a resolved
    /// record has none recorded
    pub default_mitigation_effectiveness: f64,
}

impl Default for FinancialPolicy {
    fn default() -> Self {
        Self {
            legacy_base_value: 500_000.0,
            legacy_probability_factor: 0.2,
            legacy_scale: 0.01,
            high_impact_threshold: 150_000.0,
            medium_impact_threshold: 50_000.0,
            default_mitigation_effectiveness: 0.7,
        }
    }
}
