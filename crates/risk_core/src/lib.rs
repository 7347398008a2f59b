//! # risk_core: Scoring Foundation for the Risk Register
//!
//! ## Kernel Role
//!
//! risk_core is the bottom layer of the workspace, providing:
//! - The risk level table: [`RiskLevel`] (`types::level`)
//! - Lifecycle status: [`RiskStatus`] (`types::status`)
//! - The risk record model: [`RiskRecord`], [`RiskDraft`], [`RiskMetrics`] (`types::record`)
//! - The scoring engine: score, level classification, residual score (`scoring`)
//! - Non-throwing input validation (`scoring::validation`)
//! - The record factory: build and update records with recomputed metrics (`factory`)
//! - Error types: [`ScoringError`], [`RecordError`], [`ParseError`] (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other workspace crates, with minimal
//! external dependencies:
//! - chrono: Record timestamps
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use risk_core::factory::{create_record, RiskInput};
//! use risk_core::scoring::{classify, compute_metrics};
//! use risk_core::types::{RiskId, RiskLevel, RiskStatus};
//!
//! let metrics = compute_metrics(3, 4, 0.5).unwrap();
//! assert_eq!(metrics.score, 12);
//! assert_eq!(metrics.risk_level, RiskLevel::High);
//! assert_eq!(metrics.residual_score, 6.0);
//! assert_eq!(classify(6.0), RiskLevel::Low);
//!
//! let draft = create_record(RiskInput::new("Port congestion", 5, 2)).unwrap();
//! let record = draft.with_id(RiskId::new("R001"));
//! assert_eq!(record.score(), 10);
//! assert_eq!(record.status, RiskStatus::Open);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for levels, statuses and records

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod factory;
pub mod scoring;
pub mod types;

pub use types::{
    FinancialExposure, ParseError, RecordError, RiskDraft, RiskId, RiskLevel, RiskMetrics,
    RiskRecord, RiskStatus, ScoringError,
};
