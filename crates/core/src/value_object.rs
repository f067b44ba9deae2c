//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Catalog projections such as an allowed attribute or one of its select
/// options carry no identity of their own inside this engine; two projections
/// with the same fields are the same value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
