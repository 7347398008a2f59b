//! Store error types.
//!
//! Structured errors for register mutations, derived with `thiserror`.

use risk_core::types::{RecordError, RiskId};
use thiserror::Error;

/// Errors that can occur when mutating a register.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No record carries the id.
    #[error("Risk not found: {0}")]
    NotFound(RiskId),

    /// A record with the id is already present.
    #[error("Duplicate risk ID: {0}")]
    DuplicateId(RiskId),

    /// The record factory rejected an edit.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StoreError::NotFound(RiskId::new("R7")).to_string(),
            "Risk not found: R7"
        );
        assert_eq!(
            StoreError::DuplicateId(RiskId::new("R1")).to_string(),
            "Duplicate risk ID: R1"
        );
    }

    #[test]
    fn test_record_error_is_transparent() {
        let err: StoreError =
            RecordError::Validation(vec!["Impact must be between 1 and 5".into()]).into();
        assert_eq!(
            err.to_string(),
            "Invalid risk record: Impact must be between 1 and 5"
        );
    }
}
