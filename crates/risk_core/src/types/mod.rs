//! Core risk register types.
//!
//! This module provides:
//! - `level`: The ordered risk level table used for score classification
//! - `status`: Lifecycle status of a risk
//! - `ids`: Opaque risk identifiers
//! - `record`: The risk record, its derived metrics and financial exposure
//! - `error`: Structured error types for scoring, records and parsing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod ids;
pub mod level;
pub mod record;
pub mod status;

pub use error::{ParseError, RecordError, ScoringError};
pub use ids::RiskId;
pub use level::RiskLevel;
pub use record::{FinancialExposure, Risk, RiskDraft, RiskMetrics, RiskRecord};
pub use status::RiskStatus;
