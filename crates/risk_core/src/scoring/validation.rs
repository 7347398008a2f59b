//! Input validation.
//!
//! Validation never fails: each function returns one message per problem so
//! the caller decides whether to block a save or collect row errors.
//! Values are taken as `f64` because they arrive from forms and
//! spreadsheets before being narrowed to ratings.

use super::{MAX_RATING, MIN_RATING};

/// Checks probability and impact against the 1-5 scale.
///
/// # Examples
///
/// ```
/// use risk_core::scoring::validate_assessment_inputs;
///
/// assert!(validate_assessment_inputs(5.0, 1.0).is_empty());
/// assert_eq!(
///     validate_assessment_inputs(0.0, 7.0),
///     vec![
///         "Probability must be between 1 and 5".to_string(),
///         "Impact must be between 1 and 5".to_string(),
///     ]
/// );
/// ```
pub fn validate_assessment_inputs(probability: f64, impact: f64) -> Vec<String> {
    let mut errors = Vec::new();

    if !in_rating_range(probability) {
        errors.push(format!(
            "Probability must be between {} and {}",
            MIN_RATING, MAX_RATING
        ));
    }

    if !in_rating_range(impact) {
        errors.push(format!(
            "Impact must be between {} and {}",
            MIN_RATING, MAX_RATING
        ));
    }

    errors
}

/// Checks mitigation effectiveness against [0, 1].
///
/// # Examples
///
/// ```
/// use risk_core::scoring::validate_mitigation;
///
/// assert!(validate_mitigation(0.5).is_empty());
/// assert_eq!(validate_mitigation(1.1).len(), 1);
/// ```
pub fn validate_mitigation(effectiveness: f64) -> Vec<String> {
    let mut errors = Vec::new();

    if !(0.0..=1.0).contains(&effectiveness) {
        errors.push("Mitigation effectiveness must be between 0 and 1 (0% to 100%)".to_string());
    }

    errors
}

fn in_rating_range(value: f64) -> bool {
    (f64::from(MIN_RATING)..=f64::from(MAX_RATING)).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_assessment_inputs() {
        assert!(validate_assessment_inputs(1.0, 1.0).is_empty());
        assert!(validate_assessment_inputs(5.0, 5.0).is_empty());
        assert!(validate_assessment_inputs(3.0, 2.0).is_empty());
    }

    #[test]
    fn test_invalid_probability() {
        assert_eq!(
            validate_assessment_inputs(0.0, 5.0),
            vec!["Probability must be between 1 and 5".to_string()]
        );
        assert_eq!(
            validate_assessment_inputs(10.0, 5.0),
            vec!["Probability must be between 1 and 5".to_string()]
        );
    }

    #[test]
    fn test_invalid_impact() {
        assert_eq!(
            validate_assessment_inputs(5.0, 6.0),
            vec!["Impact must be between 1 and 5".to_string()]
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        assert_eq!(validate_assessment_inputs(f64::NAN, f64::NAN).len(), 2);
        assert_eq!(validate_mitigation(f64::NAN).len(), 1);
    }

    #[test]
    fn test_mitigation_bounds() {
        assert!(validate_mitigation(0.0).is_empty());
        assert!(validate_mitigation(1.0).is_empty());
        assert_eq!(
            validate_mitigation(-0.1),
            vec!["Mitigation effectiveness must be between 0 and 1 (0% to 100%)".to_string()]
        );
    }
}
