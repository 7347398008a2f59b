//! Error types for structured error handling.
//!
//! This module provides:
//! - `ScoringError`: Guards on the scoring engine's numeric inputs
//! - `RecordError`: Failures building or updating a risk record
//! - `ParseError`: Unknown level or status names
//!
//! Input validation itself never produces these errors: it returns a list of
//! human-readable messages (see [`crate::scoring::validation`]).

use thiserror::Error;

/// Scoring engine errors.
///
/// Reaching one of these means a caller skipped validation; they are not
/// meant to be shown to end users.
///
/// # Examples
/// ```
/// use risk_core::types::ScoringError;
///
/// let err = ScoringError::RatingOutOfRange { probability: 6, impact: 2, min: 1, max: 5 };
/// assert!(format!("{}", err).contains("between 1 and 5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Probability or impact outside the rating scale.
    #[error(
        "Probability and Impact must be between {min} and {max} \
         (probability={probability}, impact={impact})"
    )]
    RatingOutOfRange {
        /// Probability supplied
        probability: u8,
        /// Impact supplied
        impact: u8,
        /// Lowest valid rating
        min: u8,
        /// Highest valid rating
        max: u8,
    },
}

/// Risk record construction errors.
///
/// # Examples
/// ```
/// use risk_core::types::RecordError;
///
/// let err = RecordError::Validation(vec![
///     "Probability must be between 1 and 5".to_string(),
///     "Impact must be between 1 and 5".to_string(),
/// ]);
/// assert_eq!(
///     format!("{}", err),
///     "Invalid risk record: Probability must be between 1 and 5; Impact must be between 1 and 5"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// One or more input fields failed validation.
    #[error("Invalid risk record: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Scoring rejected the inputs.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl RecordError {
    /// Returns the validation messages carried by this error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RecordError::Validation(errors) => errors.clone(),
            RecordError::Scoring(err) => vec![err.to_string()],
        }
    }
}

/// Name parsing errors for levels and statuses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown risk level name.
    #[error("Unknown risk level: {0}")]
    UnknownLevel(String),

    /// Unknown risk status name.
    #[error("Unknown risk status: {0}")]
    UnknownStatus(String),
}
