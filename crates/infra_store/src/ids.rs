//! Risk id generation.
//!
//! Ids are opaque: the store never parses them. [`UuidGenerator`] is the
//! production source; [`SequentialIdGenerator`] gives predictable ids for
//! tests and demos.

use risk_core::types::RiskId;
use uuid::Uuid;

/// Source of fresh risk ids.
pub trait IdGenerator: Send {
    /// Returns an id not handed out before by this generator.
    fn next_id(&mut self) -> RiskId;
}

/// Random v4 UUIDs in simple (unhyphenated) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> RiskId {
        RiskId::new(Uuid::new_v4().simple().to_string())
    }
}

/// `{prefix}{n}` ids counting up from 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Creates a generator producing `{prefix}1`, `{prefix}2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("R")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> RiskId {
        let id = RiskId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidGenerator;
        let generated: HashSet<_> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 100);
        assert!(generated.iter().all(|id| id.as_str().len() == 32));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIdGenerator::new("RISK-");
        assert_eq!(ids.next_id().as_str(), "RISK-1");
        assert_eq!(ids.next_id().as_str(), "RISK-2");
    }
}
