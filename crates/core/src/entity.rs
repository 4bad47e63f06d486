//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Collections in the session layer (comparison set, cart) deduplicate on this
/// identity rather than on structural equality.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
