//! Score, level and residual computation.

use super::matrix::RISK_MATRIX;
use super::{round_to_tenth, MAX_RATING, MIN_RATING};
use crate::types::{RiskLevel, RiskMetrics, ScoringError};

/// Computes the risk score (probability × impact) by matrix lookup.
///
/// # Errors
///
/// [`ScoringError::RatingOutOfRange`] if either rating is outside 1-5.
///
/// # Examples
///
/// ```
/// use risk_core::scoring::compute_score;
///
/// assert_eq!(compute_score(3, 4), Ok(12));
/// assert!(compute_score(6, 1).is_err());
/// ```
pub fn compute_score(probability: u8, impact: u8) -> Result<u8, ScoringError> {
    RISK_MATRIX
        .lookup(probability, impact)
        .ok_or(ScoringError::RatingOutOfRange {
            probability,
            impact,
            min: MIN_RATING,
            max: MAX_RATING,
        })
}

/// Classifies a score into the level with the greatest threshold ≤ `score`.
///
/// Scores below the lowest threshold (and NaN) fall back to the lowest level.
///
/// # Examples
///
/// ```
/// use risk_core::scoring::classify;
/// use risk_core::types::RiskLevel;
///
/// assert_eq!(classify(12.0), RiskLevel::High);
/// assert_eq!(classify(9.8), RiskLevel::Significant);
/// assert_eq!(classify(0.0), RiskLevel::Acceptable);
/// ```
pub fn classify(score: f64) -> RiskLevel {
    RiskLevel::ALL
        .iter()
        .rev()
        .find(|level| score >= f64::from(level.threshold()))
        .copied()
        .unwrap_or_else(RiskLevel::lowest)
}

/// Residual score after mitigation: `score × (1 − effectiveness)` to one decimal.
///
/// # Examples
///
/// ```
/// use risk_core::scoring::compute_residual_score;
///
/// assert_eq!(compute_residual_score(10.0, 0.5), 5.0);
/// assert_eq!(compute_residual_score(20.0, 0.2), 16.0);
/// assert_eq!(compute_residual_score(15.0, 1.0), 0.0);
/// ```
pub fn compute_residual_score(score: f64, mitigation_effectiveness: f64) -> f64 {
    round_to_tenth(score * (1.0 - mitigation_effectiveness))
}

/// Computes every derived field of a risk from its raw inputs.
///
/// This is the single entry point for (re)computing a record's metrics.
///
/// # Errors
///
/// [`ScoringError::RatingOutOfRange`] if either rating is outside 1-5.
pub fn compute_metrics(
    probability: u8,
    impact: u8,
    mitigation_effectiveness: f64,
) -> Result<RiskMetrics, ScoringError> {
    let score = compute_score(probability, impact)?;
    let residual_score = compute_residual_score(f64::from(score), mitigation_effectiveness);

    Ok(RiskMetrics {
        score,
        risk_level: classify(f64::from(score)),
        residual_score,
        residual_risk_level: classify(residual_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_score() {
        assert_eq!(compute_score(1, 1), Ok(1));
        assert_eq!(compute_score(3, 4), Ok(12));
        assert_eq!(compute_score(5, 5), Ok(25));
    }

    #[test]
    fn test_compute_score_out_of_range() {
        assert!(compute_score(0, 3).is_err());
        assert!(compute_score(3, 0).is_err());
        assert!(compute_score(9, 9).is_err());
    }

    #[test]
    fn test_classify_band_edges() {
        assert_eq!(classify(1.0), RiskLevel::Acceptable);
        assert_eq!(classify(2.0), RiskLevel::Acceptable);
        assert_eq!(classify(3.0), RiskLevel::VeryLow);
        assert_eq!(classify(5.0), RiskLevel::Low);
        assert_eq!(classify(8.0), RiskLevel::Significant);
        assert_eq!(classify(10.0), RiskLevel::High);
        assert_eq!(classify(15.0), RiskLevel::VeryHigh);
        assert_eq!(classify(20.0), RiskLevel::ProceedAtOwnRisk);
        assert_eq!(classify(25.0), RiskLevel::ProceedAtOwnRisk);
    }

    #[test]
    fn test_classify_below_lowest_threshold() {
        assert_eq!(classify(0.5), RiskLevel::Acceptable);
        assert_eq!(classify(-3.0), RiskLevel::Acceptable);
        assert_eq!(classify(f64::NAN), RiskLevel::Acceptable);
    }

    #[test]
    fn test_classify_fractional_residuals() {
        assert_eq!(classify(2.9), RiskLevel::Acceptable);
        assert_eq!(classify(14.9), RiskLevel::High);
        assert_eq!(classify(19.99), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_residual_score() {
        assert_eq!(compute_residual_score(10.0, 0.5), 5.0);
        assert_eq!(compute_residual_score(15.0, 0.0), 15.0);
        assert_eq!(compute_residual_score(15.0, 1.0), 0.0);
        assert_relative_eq!(compute_residual_score(12.0, 0.3), 8.4, epsilon = 1e-12);
        assert_relative_eq!(compute_residual_score(20.0, 0.15), 17.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compute_metrics() {
        let metrics = compute_metrics(4, 5, 0.2).unwrap();
        assert_eq!(metrics.score, 20);
        assert_eq!(metrics.risk_level, RiskLevel::ProceedAtOwnRisk);
        assert_relative_eq!(metrics.residual_score, 16.0, epsilon = 1e-12);
        assert_eq!(metrics.residual_risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_compute_metrics_zero_mitigation() {
        let metrics = compute_metrics(3, 4, 0.0).unwrap();
        assert_eq!(metrics.score, 12);
        assert_eq!(metrics.residual_score, 12.0);
        assert_eq!(metrics.risk_level, metrics.residual_risk_level);
    }

    #[test]
    fn test_compute_metrics_rejects_out_of_range() {
        assert_eq!(
            compute_metrics(6, 8, 0.3),
            Err(ScoringError::RatingOutOfRange {
                probability: 6,
                impact: 8,
                min: 1,
                max: 5
            })
        );
    }
}
