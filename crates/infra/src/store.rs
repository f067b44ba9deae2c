//! In-memory assignment and attribute value stores.
//!
//! Intended for tests/dev. Records are kept in insertion order, which is the
//! order queries return them in.

use std::sync::RwLock;

use mpassign_assignment::{
    AssignmentFilter, AssignmentStore, AttributeValueFilter, AttributeValueRecord,
    AttributeValueStore, ProductAssignment, StoreError,
};
use mpassign_core::{AssignmentId, Entity};

#[derive(Debug, Default)]
struct AssignmentRows {
    rows: Vec<ProductAssignment>,
    last_id: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryAssignmentStore {
    inner: RwLock<AssignmentRows>,
}

impl InMemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssignmentStore for InMemoryAssignmentStore {
    fn insert(&self, mut assignment: ProductAssignment) -> Result<ProductAssignment, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.last_id += 1;
        assignment.id = AssignmentId::new(inner.last_id);
        inner.rows.push(assignment.clone());
        Ok(assignment)
    }

    fn update(&self, assignment: &ProductAssignment) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let row = inner
            .rows
            .iter_mut()
            .find(|row| row.same_identity(assignment))
            .ok_or(StoreError::AssignmentNotFound(assignment.id))?;
        *row = assignment.clone();
        Ok(())
    }

    fn get(&self, id: AssignmentId) -> Result<Option<ProductAssignment>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.rows.iter().find(|row| row.id == id).cloned())
    }

    fn find(&self, filter: &AssignmentFilter) -> Result<Vec<ProductAssignment>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }
}

/// One row per `(attribute, assignment, store view)`; inserting an existing
/// key is rejected.
#[derive(Debug, Default)]
pub struct InMemoryAttributeValueStore {
    rows: RwLock<Vec<AttributeValueRecord>>,
}

impl InMemoryAttributeValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AttributeValueStore for InMemoryAttributeValueStore {
    fn insert(&self, record: AttributeValueRecord) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        if rows.iter().any(|row| row.same_identity(&record)) {
            return Err(StoreError::DuplicateValue(record.key));
        }
        rows.push(record);
        Ok(())
    }

    fn update(&self, record: &AttributeValueRecord) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        let row = rows
            .iter_mut()
            .find(|row| row.same_identity(record))
            .ok_or(StoreError::ValueNotFound(record.key))?;
        *row = record.clone();
        Ok(())
    }

    fn find(&self, filter: &AttributeValueFilter) -> Result<Vec<AttributeValueRecord>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.iter().filter(|row| filter.matches(row)).cloned().collect())
    }
}
