//! # Infra Store (Register Layer)
//!
//! Holds the risk register behind the [`RiskStore`] repository trait so the
//! scoring and aggregation crates never see how records are kept.
//!
//! This crate provides:
//! - [`RiskStore`]: `add`, `insert`, `update`, `remove`, `get`, `list`,
//!   `replace_all`
//! - [`InMemoryRiskStore`]: insertion-ordered in-memory register
//! - [`IdGenerator`]: opaque id assignment ([`UuidGenerator`],
//!   [`SequentialIdGenerator`])
//! - [`RiskQuery`]: filter by level/status/category/project and sort
//!
//! ## Example
//!
//! ```
//! use infra_store::{InMemoryRiskStore, RiskQuery, RiskStore, SequentialIdGenerator};
//! use risk_core::factory::{create_record, RiskChanges, RiskInput};
//! use risk_core::types::RiskLevel;
//!
//! let mut store = InMemoryRiskStore::with_id_generator(SequentialIdGenerator::default());
//! let id = store.add(create_record(RiskInput::new("Inverter failure", 2, 3)).unwrap());
//! store.update(&id, RiskChanges::new().probability(4)).unwrap();
//!
//! let high = RiskQuery::new().level(RiskLevel::High).apply(store.list());
//! assert_eq!(high.len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod ids;
pub mod memory;
pub mod query;

pub use error::{Result, StoreError};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use memory::{InMemoryRiskStore, RiskStore};
pub use query::{categories, projects, RiskQuery, SortDirection, SortField};
