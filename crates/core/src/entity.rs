//! Entity trait: records whose identity survives edits.

/// A record identified by a key rather than by its field values.
///
/// Assignments keep their id across edits; attribute values are identified by
/// their `(attribute, assignment, store view)` key.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` is the same record (possibly in another state).
    fn same_identity(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.id() == other.id()
    }
}
