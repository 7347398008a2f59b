//! Risk register storage.
//!
//! [`RiskStore`] is the repository seam between the register and whatever
//! holds it; [`InMemoryRiskStore`] keeps records in insertion order in a
//! `Vec`. Edits go through the record factory so derived metrics are never
//! stale.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use risk_core::factory::{update_record_at, RiskChanges};
use risk_core::types::{RiskDraft, RiskId, RiskRecord, RiskStatus};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::ids::{IdGenerator, UuidGenerator};

/// Repository of risk records.
pub trait RiskStore {
    /// Assigns a fresh id to `draft` and stores it.
    fn add(&mut self, draft: RiskDraft) -> RiskId;

    /// Stores a record that already has an id.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateId`] if the id is taken.
    fn insert(&mut self, record: RiskRecord) -> Result<()>;

    /// Applies `changes` to the record `id` with `updated_at = now`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown id, [`StoreError::Record`]
    /// if the changes are invalid; the stored record is then untouched.
    fn update_at(
        &mut self,
        id: &RiskId,
        changes: RiskChanges,
        now: DateTime<Utc>,
    ) -> Result<&RiskRecord>;

    /// Removes and returns the record `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown id.
    fn remove(&mut self, id: &RiskId) -> Result<RiskRecord>;

    /// The record `id`, if present.
    fn get(&self, id: &RiskId) -> Option<&RiskRecord>;

    /// All records in insertion order.
    fn list(&self) -> &[RiskRecord];

    /// Replaces the whole register.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateId`] if `records` repeats an id; the register
    /// is then untouched.
    fn replace_all(&mut self, records: Vec<RiskRecord>) -> Result<()>;

    /// [`RiskStore::update_at`] at the current time.
    fn update(&mut self, id: &RiskId, changes: RiskChanges) -> Result<&RiskRecord> {
        self.update_at(id, changes, Utc::now())
    }

    /// Changes only the status of `id`.
    fn set_status(&mut self, id: &RiskId, status: RiskStatus) -> Result<&RiskRecord> {
        self.update(id, RiskChanges::new().status(status))
    }

    /// Adds every draft, returning the assigned ids in order.
    fn add_all(&mut self, drafts: Vec<RiskDraft>) -> Vec<RiskId> {
        drafts.into_iter().map(|draft| self.add(draft)).collect()
    }

    /// Number of records.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Whether the register is empty.
    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// Register held in memory.
///
/// # Examples
///
/// ```
/// use infra_store::{InMemoryRiskStore, RiskStore, SequentialIdGenerator};
/// use risk_core::factory::{create_record, RiskInput};
///
/// let mut store = InMemoryRiskStore::with_id_generator(SequentialIdGenerator::default());
/// let id = store.add(create_record(RiskInput::new("Port congestion", 5, 2)).unwrap());
/// assert_eq!(id.as_str(), "R1");
/// assert_eq!(store.get(&id).map(|r| r.score()), Some(10));
/// ```
pub struct InMemoryRiskStore {
    records: Vec<RiskRecord>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryRiskStore {
    /// Empty store handing out UUID ids.
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }

    /// Empty store using `ids` for new records.
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            records: Vec::new(),
            ids: Box::new(ids),
        }
    }

    /// Store pre-filled with `records`.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateId`] if `records` repeats an id.
    pub fn from_records(records: Vec<RiskRecord>) -> Result<Self> {
        let mut store = Self::new();
        store.replace_all(records)?;
        Ok(store)
    }

    fn position(&self, id: &RiskId) -> Option<usize> {
        self.records.iter().position(|record| &record.id == id)
    }

    fn next_free_id(&mut self) -> RiskId {
        loop {
            let id = self.ids.next_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

impl Default for InMemoryRiskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryRiskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRiskStore")
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl RiskStore for InMemoryRiskStore {
    fn add(&mut self, draft: RiskDraft) -> RiskId {
        let id = self.next_free_id();
        debug!(id = %id, score = draft.score(), "adding risk");
        self.records.push(draft.with_id(id.clone()));
        id
    }

    fn insert(&mut self, record: RiskRecord) -> Result<()> {
        if self.position(&record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }
        debug!(id = %record.id, "inserting risk");
        self.records.push(record);
        Ok(())
    }

    fn update_at(
        &mut self,
        id: &RiskId,
        changes: RiskChanges,
        now: DateTime<Utc>,
    ) -> Result<&RiskRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let updated = update_record_at(&self.records[index], changes, now)?;
        debug!(
            id = %id,
            score = updated.score(),
            level = %updated.risk_level(),
            "updated risk"
        );
        self.records[index] = updated;
        Ok(&self.records[index])
    }

    fn remove(&mut self, id: &RiskId) -> Result<RiskRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        debug!(id = %id, "removing risk");
        Ok(self.records.remove(index))
    }

    fn get(&self, id: &RiskId) -> Option<&RiskRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    fn list(&self) -> &[RiskRecord] {
        &self.records
    }

    fn replace_all(&mut self, records: Vec<RiskRecord>) -> Result<()> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }
        debug!(count = records.len(), "replacing register");
        self.records = records;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use chrono::TimeZone;
    use risk_core::factory::{create_record_at, RiskInput};
    use risk_core::types::RiskLevel;

    fn t(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, day, 8, 30, 0).unwrap()
    }

    fn draft(description: &str, p: u8, i: u8) -> RiskDraft {
        create_record_at(RiskInput::new(description, p, i), t(1)).unwrap()
    }

    fn store() -> InMemoryRiskStore {
        InMemoryRiskStore::with_id_generator(SequentialIdGenerator::default())
    }

    #[test]
    fn test_add_assigns_ids_in_order() {
        let mut store = store();
        let ids = store.add_all(vec![draft("a", 1, 1), draft("b", 2, 2)]);
        assert_eq!(ids, vec![RiskId::new("R1"), RiskId::new("R2")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].description, "b");
    }

    #[test]
    fn test_add_skips_taken_ids() {
        let mut store = store();
        store.insert(draft("imported", 1, 1).with_id(RiskId::new("R1"))).unwrap();
        let id = store.add(draft("new", 1, 1));
        assert_eq!(id.as_str(), "R2");
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut store = store();
        let id = store.add(draft("a", 1, 1));
        let err = store.insert(draft("b", 1, 1).with_id(id.clone())).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_recomputes_metrics() {
        let mut store = store();
        let id = store.add(draft("Tariff increase", 2, 2));
        let updated = store
            .update_at(&id, RiskChanges::new().probability(5).impact(4), t(3))
            .unwrap();
        assert_eq!(updated.score(), 20);
        assert_eq!(updated.risk_level(), RiskLevel::ProceedAtOwnRisk);
        assert_eq!(updated.updated_at, t(3));
        assert_eq!(updated.created_at, t(1));
    }

    #[test]
    fn test_invalid_update_leaves_record() {
        let mut store = store();
        let id = store.add(draft("Tariff increase", 2, 2));
        let err = store.update(&id, RiskChanges::new().impact(9)).unwrap_err();
        assert!(matches!(err, StoreError::Record(_)));
        assert_eq!(store.get(&id).map(|r| r.impact()), Some(2));
    }

    #[test]
    fn test_unknown_id() {
        let mut store = store();
        let missing = RiskId::new("nope");
        assert_eq!(
            store.remove(&missing).unwrap_err(),
            StoreError::NotFound(missing.clone())
        );
        assert!(store.set_status(&missing, RiskStatus::Closed).is_err());
        assert!(store.get(&missing).is_none());
    }

    #[test]
    fn test_set_status_and_remove() {
        let mut store = store();
        let id = store.add(draft("a", 3, 3));
        assert_eq!(
            store.set_status(&id, RiskStatus::Mitigated).unwrap().status,
            RiskStatus::Mitigated
        );
        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_all_rejects_duplicates() {
        let mut store = store();
        store.add(draft("kept", 1, 1));
        let err = store
            .replace_all(vec![
                draft("x", 1, 1).with_id(RiskId::new("A")),
                draft("y", 1, 1).with_id(RiskId::new("A")),
            ])
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(RiskId::new("A")));
        assert_eq!(store.list()[0].description, "kept");
    }
}
