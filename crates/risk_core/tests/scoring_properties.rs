//! Property tests for the scoring engine.
//!
//! Covers the matrix identity, tightest-band classification, residual
//! score bounds and monotonicity, and metric idempotence.

use proptest::prelude::*;
use risk_core::factory::{create_record_at, RiskInput};
use risk_core::scoring::{
    classify, compute_metrics, compute_residual_score, compute_score, RISK_MATRIX,
};
use risk_core::types::RiskLevel;

/// Every cell of the matrix is the product of its ratings.
#[test]
fn test_matrix_agrees_with_product() {
    for p in 1u8..=5 {
        for i in 1u8..=5 {
            assert_eq!(compute_score(p, i), Ok(p * i));
            assert_eq!(RISK_MATRIX.lookup(p, i), Some(p * i));
        }
    }
}

/// Example scenario: 3 × 4 = 12 lands in the HIGH band (10-14).
#[test]
fn test_score_twelve_scenario() {
    let score = compute_score(3, 4).unwrap();
    assert_eq!(score, 12);
    assert_eq!(classify(f64::from(score)).name(), "HIGH");
}

#[test]
fn test_residual_example() {
    assert_eq!(compute_residual_score(10.0, 0.5), 5.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_out_of_range_ratings_rejected(p in 6u8..=255, i in 0u8..=255) {
        prop_assert!(compute_score(p, i).is_err());
        prop_assert!(compute_score(i, p).is_err());
    }

    #[test]
    fn prop_classify_picks_tightest_band(score in 1u8..=25) {
        let level = classify(f64::from(score));
        prop_assert!(level.threshold() <= score);
        for other in RiskLevel::ALL {
            if other != level {
                prop_assert!(
                    !(other.threshold() > level.threshold() && other.threshold() <= score),
                    "{} is tighter than {} for score {}", other, level, score
                );
            }
        }
    }

    #[test]
    fn prop_residual_bounds(score in 1u8..=25) {
        let s = f64::from(score);
        prop_assert_eq!(compute_residual_score(s, 0.0), s);
        prop_assert_eq!(compute_residual_score(s, 1.0), 0.0);
    }

    #[test]
    fn prop_residual_non_increasing(score in 1u8..=25, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let s = f64::from(score);
        prop_assert!(compute_residual_score(s, hi) <= compute_residual_score(s, lo));
    }

    #[test]
    fn prop_metrics_idempotent(p in 1u8..=5, i in 1u8..=5, m in 0.0f64..=1.0) {
        let first = compute_metrics(p, i, m).unwrap();
        let second = compute_metrics(p, i, m).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(first.residual_risk_level <= first.risk_level);
    }

    #[test]
    fn prop_factory_matches_engine(p in 1u8..=5, i in 1u8..=5, m in 0.0f64..=1.0) {
        let now = chrono::Utc::now();
        let draft = create_record_at(RiskInput::new("risk", p, i).with_mitigation(m), now).unwrap();
        prop_assert_eq!(draft.metrics(), &compute_metrics(p, i, m).unwrap());
    }
}
