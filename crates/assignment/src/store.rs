//! Storage seams for assignments and their attribute values.
//!
//! The host platform owns the actual tables; in-memory implementations for
//! tests/dev live in `mpassign-infra`.

use std::sync::Arc;

use thiserror::Error;

use mpassign_core::{AssignmentId, AttributeId, ProductId, SellerId, StoreViewId};

use crate::assignment::{AttributeValueKey, AttributeValueRecord, ProductAssignment};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("assignment {0} not found")]
    AssignmentNotFound(AssignmentId),

    #[error("attribute value already exists: {0:?}")]
    DuplicateValue(AttributeValueKey),

    #[error("attribute value not found: {0:?}")]
    ValueNotFound(AttributeValueKey),
}

/// Query over assignments. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    pub product_id: Option<ProductId>,
    pub seller_id: Option<SellerId>,
    pub exclude: Option<AssignmentId>,
}

impl AssignmentFilter {
    pub fn product(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
            ..Self::default()
        }
    }

    pub fn seller(mut self, seller_id: SellerId) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn excluding(mut self, id: AssignmentId) -> Self {
        self.exclude = Some(id);
        self
    }

    pub fn matches(&self, assignment: &ProductAssignment) -> bool {
        self.product_id.is_none_or(|id| assignment.product_id == id)
            && self.seller_id.is_none_or(|id| assignment.seller_id == id)
            && self.exclude.is_none_or(|id| assignment.id != id)
    }
}

/// Query over attribute values. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeValueFilter {
    pub attribute_id: Option<AttributeId>,
    pub assignment_id: Option<AssignmentId>,
    pub store_view: Option<StoreViewId>,
    pub is_default: Option<bool>,
}

impl AttributeValueFilter {
    pub fn assignment(assignment_id: AssignmentId) -> Self {
        Self {
            assignment_id: Some(assignment_id),
            ..Self::default()
        }
    }

    pub fn attribute(mut self, attribute_id: AttributeId) -> Self {
        self.attribute_id = Some(attribute_id);
        self
    }

    pub fn store_view(mut self, store_view: StoreViewId) -> Self {
        self.store_view = Some(store_view);
        self
    }

    pub fn defaults_only(mut self) -> Self {
        self.is_default = Some(true);
        self
    }

    pub fn matches(&self, record: &AttributeValueRecord) -> bool {
        self.attribute_id.is_none_or(|id| record.key.attribute_id == id)
            && self.assignment_id.is_none_or(|id| record.key.assignment_id == id)
            && self.store_view.is_none_or(|id| record.key.store_view == id)
            && self.is_default.is_none_or(|flag| record.is_default == flag)
    }
}

impl From<AttributeValueKey> for AttributeValueFilter {
    fn from(key: AttributeValueKey) -> Self {
        Self::assignment(key.assignment_id)
            .attribute(key.attribute_id)
            .store_view(key.store_view)
    }
}

pub trait AssignmentStore: Send + Sync {
    /// Persist a new assignment; the store assigns its id.
    fn insert(&self, assignment: ProductAssignment) -> Result<ProductAssignment, StoreError>;

    /// Overwrite an existing assignment in place.
    fn update(&self, assignment: &ProductAssignment) -> Result<(), StoreError>;

    fn get(&self, id: AssignmentId) -> Result<Option<ProductAssignment>, StoreError>;

    /// Matching assignments in insertion order.
    fn find(&self, filter: &AssignmentFilter) -> Result<Vec<ProductAssignment>, StoreError>;
}

pub trait AttributeValueStore: Send + Sync {
    fn insert(&self, record: AttributeValueRecord) -> Result<(), StoreError>;

    fn update(&self, record: &AttributeValueRecord) -> Result<(), StoreError>;

    /// Matching values in insertion order.
    fn find(&self, filter: &AttributeValueFilter) -> Result<Vec<AttributeValueRecord>, StoreError>;
}

impl<S> AssignmentStore for Arc<S>
where
    S: AssignmentStore + ?Sized,
{
    fn insert(&self, assignment: ProductAssignment) -> Result<ProductAssignment, StoreError> {
        (**self).insert(assignment)
    }

    fn update(&self, assignment: &ProductAssignment) -> Result<(), StoreError> {
        (**self).update(assignment)
    }

    fn get(&self, id: AssignmentId) -> Result<Option<ProductAssignment>, StoreError> {
        (**self).get(id)
    }

    fn find(&self, filter: &AssignmentFilter) -> Result<Vec<ProductAssignment>, StoreError> {
        (**self).find(filter)
    }
}

impl<S> AttributeValueStore for Arc<S>
where
    S: AttributeValueStore + ?Sized,
{
    fn insert(&self, record: AttributeValueRecord) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn update(&self, record: &AttributeValueRecord) -> Result<(), StoreError> {
        (**self).update(record)
    }

    fn find(&self, filter: &AttributeValueFilter) -> Result<Vec<AttributeValueRecord>, StoreError> {
        (**self).find(filter)
    }
}
