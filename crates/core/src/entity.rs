//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records fetched from the inventory service are compared by identifier, never
/// by field values: an item renamed between two fetches is still the same item.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// True when this entity carries the given identifier.
    fn is(&self, id: Self::Id) -> bool {
        self.id() == id
    }
}
