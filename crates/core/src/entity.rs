//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Drop entities whose id was already seen, keeping the first occurrence.
///
/// Relative order of the survivors is preserved.
pub fn dedup_by_id<E: Entity>(entities: impl IntoIterator<Item = E>) -> Vec<E> {
    let mut seen: HashSet<E::Id> = HashSet::new();
    entities
        .into_iter()
        .filter(|e| seen.insert(e.id().clone()))
        .collect()
}
