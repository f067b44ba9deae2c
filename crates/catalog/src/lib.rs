//! Catalog access for seller assignments.
//!
//! The catalog itself belongs to the host platform; this crate only describes
//! the shape this engine reads (`Catalog`, `CatalogProduct`, `CatalogAttribute`)
//! and projects it into the attributes a seller is allowed to set.

pub mod allowed;
pub mod product;

pub use allowed::{AllowedAttribute, AllowedAttributes, SkipReason, allowed_attributes};
pub use product::{
    AttributeBackend, AttributeInput, AttributeOption, Catalog, CatalogAttribute, CatalogProduct,
};
