//! # Risk Analytics (Aggregation Layer)
//!
//! Register-wide and per-project aggregation over a collection of risk
//! records. Every function is pure and recomputes its result in full from
//! the records it is given; nothing is cached between calls.
//!
//! This crate provides:
//! - Register summary: counts by level, status and project (`summary`)
//! - Project summary: high/open/mitigated counts, average score, trend,
//!   expected profitability impact and event timeline (`project`, `timeline`)
//! - Financial impact and mitigation savings estimates (`financial`)
//! - The classification thresholds as configuration (`policy`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          risk_analytics                 │
//! ├─────────────────────────────────────────┤
//! │  summary/   - RiskSummary               │
//! │  project/   - ProjectRiskSummary,       │
//! │               ProjectAnalytics          │
//! │  timeline/  - TimelineEntry             │
//! │  financial/ - impact, savings, category │
//! │  policy/    - AnalyticsPolicy           │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │             risk_core                   │
//! │  Level table, scoring engine, records   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use risk_analytics::{summarize, RiskAnalyzer};
//! use risk_core::factory::{create_record, RiskInput};
//! use risk_core::types::{RiskId, RiskLevel};
//!
//! let records = vec![
//!     create_record(RiskInput::new("Port congestion", 5, 2).with_project("Solar"))
//!         .unwrap()
//!         .with_id(RiskId::new("R1")),
//!     create_record(RiskInput::new("COD delayed", 4, 5).with_project("Solar"))
//!         .unwrap()
//!         .with_id(RiskId::new("R2")),
//! ];
//!
//! let summary = summarize(&records);
//! assert_eq!(summary.total, 2);
//! assert_eq!(summary.by_level[&RiskLevel::High], 1);
//!
//! let analyzer = RiskAnalyzer::default();
//! let project = analyzer.summarize_project(&records, "Solar", Utc::now());
//! assert_eq!(project.high_risks, 2);
//! assert_eq!(project.average_score, 15.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod financial;
pub mod policy;
pub mod project;
pub mod summary;
pub mod timeline;

pub use financial::{financial_impact, mitigation_savings, potential_savings, ImpactCategory};
pub use policy::{AnalyticsPolicy, FinancialPolicy, ProfitabilityPolicy, TrendPolicy};
pub use project::{
    project_names, ProfitabilityImpact, ProjectAnalytics, ProjectRiskSummary, RiskAnalyzer,
    RiskTrend,
};
pub use summary::{summarize, RiskSummary};
pub use timeline::{build_timeline, TimelineEntry, TimelineEvent};
