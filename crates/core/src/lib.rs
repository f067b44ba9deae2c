//! `mpassign-core`: shared building blocks for the seller assignment engine.
//!
//! This crate contains **pure domain** primitives (no storage, no catalog access).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AssignmentId, AttributeId, ProductId, SellerId, StoreViewId};
pub use value_object::ValueObject;
