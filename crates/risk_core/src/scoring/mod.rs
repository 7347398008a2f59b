//! Scoring engine.
//!
//! Pure functions turning a risk's raw ratings into its derived fields:
//! - `matrix`: The 5x5 probability × impact score matrix
//! - `metrics`: Score, level classification, residual score, full metrics
//! - `validation`: Non-throwing range checks returning human-readable messages
//!
//! The scale is 1-5 for both probability and impact (scores 1-25). Callers
//! validate with [`validate_assessment_inputs`] and [`validate_mitigation`]
//! before scoring; [`compute_score`] only rejects out-of-range ratings as a
//! guard against skipped validation.

pub mod matrix;
pub mod metrics;
pub mod validation;

pub use matrix::{is_attainable_score, RiskMatrix, RISK_MATRIX};
pub use metrics::{classify, compute_metrics, compute_residual_score, compute_score};
pub use validation::{validate_assessment_inputs, validate_mitigation};

/// Lowest probability/impact rating.
pub const MIN_RATING: u8 = 1;

/// Highest probability/impact rating.
pub const MAX_RATING: u8 = 5;

/// Rounds to one decimal place, halves away from zero.
///
/// # Examples
///
/// ```
/// use risk_core::scoring::round_to_tenth;
///
/// assert_eq!(round_to_tenth(8.4), 8.4);
/// assert_eq!(round_to_tenth(11.25), 11.3);
/// assert_eq!(round_to_tenth(11.6666), 11.7);
/// ```
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
