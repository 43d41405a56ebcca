//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Work-day records and accounts are entities: a record keeps its identity
/// while it moves through paid/deleted states, and an account keeps its
/// username while its credential rotates.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
