//! Observed-Remove Set (OR-Set).
//!
//! Unlike a tag-per-add-wins variant, this set mirrors the reference
//! implementation directly: elements are already globally unique identifiers
//! (list ids, item ids), so there is no need for a second add-tag layer.
//! `add(x)` inserts `x` into the add-set `A`; `remove(x)` inserts into the
//! remove-set `R`, but only if `x` is currently in `A`. The effective set is
//! `A \ R`, and merge is a componentwise union of both sets.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// An Observed-Remove Set keyed directly by unique element identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Eq + Hash + Serialize + for<'de2> Deserialize<'de2>")]
pub struct OrSet<T>
where
    T: Eq + Hash + Clone,
{
    add_set: HashSet<T>,
    remove_set: HashSet<T>,
}

impl<T> Default for OrSet<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates a new, empty OR-Set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            add_set: HashSet::new(),
            remove_set: HashSet::new(),
        }
    }

    /// Adds `id` to the add-set.
    pub fn add(&mut self, id: T) {
        self.add_set.insert(id);
    }

    /// Removes `id`. A no-op if `id` was never added.
    pub fn remove(&mut self, id: &T) {
        if self.add_set.contains(id) {
            self.remove_set.insert(id.clone());
        }
    }

    /// Returns true if `id` is in the effective set (`A \ R`).
    #[must_use]
    pub fn contains(&self, id: &T) -> bool {
        self.add_set.contains(id) && !self.remove_set.contains(id)
    }

    /// Returns the effective set, `A \ R`.
    #[must_use]
    pub fn items(&self) -> HashSet<T> {
        self.add_set.difference(&self.remove_set).cloned().collect()
    }

    /// Returns the tombstone set, `R`.
    #[must_use]
    pub fn tombstones(&self) -> &HashSet<T> {
        &self.remove_set
    }

    /// Merges another OR-Set into this one: componentwise union of `A` and
    /// `R`. Commutative, associative, idempotent.
    pub fn merge(&mut self, other: &Self) {
        self.add_set.extend(other.add_set.iter().cloned());
        self.remove_set.extend(other.remove_set.iter().cloned());
    }

    /// Returns a new set that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }
}
