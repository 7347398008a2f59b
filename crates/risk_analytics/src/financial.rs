//! Financial impact estimates.
//!
//! A record with a [`FinancialExposure`](risk_core::types::FinancialExposure)
//! is valued as `per_unit × units × (probability / 5)`. Records without one
//! fall back to the legacy estimate
//! `score × base_value × (probability × factor) × scale`.

use std::fmt;

use risk_core::scoring::MAX_RATING;
use risk_core::types::Risk;

use crate::policy::FinancialPolicy;

/// Size class of a financial total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImpactCategory {
    /// Below the medium threshold
    Low,
    /// At or above the medium threshold
    Medium,
    /// At or above the high threshold
    High,
}

impl ImpactCategory {
    /// Classifies `total` against the policy thresholds.
    pub fn classify(total: f64, policy: &FinancialPolicy) -> Self {
        if total >= policy.high_impact_threshold {
            ImpactCategory::High
        } else if total >= policy.medium_impact_threshold {
            ImpactCategory::Medium
        } else {
            ImpactCategory::Low
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ImpactCategory::Low => "low",
            ImpactCategory::Medium => "medium",
            ImpactCategory::High => "high",
        }
    }
}

impl fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Probability-weighted financial impact of `record`.
pub fn financial_impact<Id>(record: &Risk<Id>, policy: &FinancialPolicy) -> f64 {
    let probability = f64::from(record.probability());
    match &record.exposure {
        Some(exposure) => exposure.gross() * (probability / f64::from(MAX_RATING)),
        None => {
            f64::from(record.score())
                * policy.legacy_base_value
                * (probability * policy.legacy_probability_factor)
                * policy.legacy_scale
        }
    }
}

/// Savings from the record's mitigation.
///
/// A precomputed `mitigation_savings` on the record takes precedence.
pub fn mitigation_savings<Id>(record: &Risk<Id>, policy: &FinancialPolicy) -> f64 {
    record.mitigation_savings.unwrap_or_else(|| {
        financial_impact(record, policy) * record.mitigation_effectiveness()
    })
}

/// Savings realised by a resolved (Mitigated or Closed) record; 0 otherwise.
///
/// A zero effectiveness is replaced by
/// [`FinancialPolicy::default_mitigation_effectiveness`].
pub fn potential_savings<Id>(record: &Risk<Id>, policy: &FinancialPolicy) -> f64 {
    if !record.status.is_resolved() {
        return 0.0;
    }
    if let Some(savings) = record.mitigation_savings {
        return savings;
    }
    let effectiveness = if record.mitigation_effectiveness() > 0.0 {
        record.mitigation_effectiveness()
    } else {
        policy.default_mitigation_effectiveness
    };
    financial_impact(record, policy) * effectiveness
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use risk_core::factory::{create_record, RiskInput};
    use risk_core::types::{FinancialExposure, RiskDraft, RiskStatus};

    fn draft(input: RiskInput) -> RiskDraft {
        create_record(input).unwrap()
    }

    #[test]
    fn test_exposure_based_impact() {
        let policy = FinancialPolicy::default();
        let risk = draft(
            RiskInput::new("Grid connection delay", 4, 5)
                .with_exposure(FinancialExposure::new(15_000.0, 20.0).with_unit_type("days")),
        );
        // 300k × 4/5
        assert_relative_eq!(financial_impact(&risk, &policy), 240_000.0);
    }

    #[test]
    fn test_legacy_impact() {
        let policy = FinancialPolicy::default();
        let risk = draft(RiskInput::new("Weather delay", 3, 4));
        // 12 × 500k × 0.6 × 0.01
        assert_relative_eq!(financial_impact(&risk, &policy), 36_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mitigation_savings() {
        let policy = FinancialPolicy::default();
        let mut risk = draft(
            RiskInput::new("Module tariff", 5, 4)
                .with_mitigation(0.5)
                .with_exposure(FinancialExposure::new(1_000.0, 100.0)),
        );
        assert_relative_eq!(mitigation_savings(&risk, &policy), 50_000.0);

        risk.mitigation_savings = Some(12_345.0);
        assert_eq!(mitigation_savings(&risk, &policy), 12_345.0);
    }

    #[test]
    fn test_potential_savings_only_for_resolved() {
        let policy = FinancialPolicy::default();
        let exposure = FinancialExposure::new(10_000.0, 5.0);

        let open = draft(RiskInput::new("a", 5, 5).with_exposure(exposure.clone()));
        assert_eq!(potential_savings(&open, &policy), 0.0);

        let closed = draft(
            RiskInput::new("b", 5, 5)
                .with_status(RiskStatus::Closed)
                .with_exposure(exposure.clone()),
        );
        assert_relative_eq!(potential_savings(&closed, &policy), 35_000.0);

        let mitigated = draft(
            RiskInput::new("c", 5, 5)
                .with_mitigation(0.2)
                .with_status(RiskStatus::Mitigated)
                .with_exposure(exposure),
        );
        assert_relative_eq!(potential_savings(&mitigated, &policy), 10_000.0);
    }

    #[test]
    fn test_impact_category_boundaries() {
        let policy = FinancialPolicy::default();
        assert_eq!(ImpactCategory::classify(150_000.0, &policy), ImpactCategory::High);
        assert_eq!(ImpactCategory::classify(149_999.99, &policy), ImpactCategory::Medium);
        assert_eq!(ImpactCategory::classify(50_000.0, &policy), ImpactCategory::Medium);
        assert_eq!(ImpactCategory::classify(0.0, &policy), ImpactCategory::Low);
    }
}
