//! Entity trait: identity + continuity across snapshots.

/// Entity marker + minimal interface.
///
/// Two snapshot records with the same id describe the same warehouse/product,
/// even when their quantities or names differ between snapshots.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
