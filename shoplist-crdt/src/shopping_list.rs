//! Shopping list facade over [`OrMap`].
//!
//! A thin wrapper that owns item-id generation so callers never have to
//! mint their own [`ItemId`]s. Case folding / display formatting of item
//! names is left to callers.

use serde::{Deserialize, Serialize};
use shoplist_types::ItemId;
use std::collections::HashMap;

use crate::or_map::OrMap;

/// A single shopping list: a mergeable collection of named, quantified,
/// acquirable items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShoppingList {
    or_map: OrMap,
}

impl ShoppingList {
    /// Creates a new, empty shopping list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing OR-Map, e.g. one rebuilt from the wire schema.
    #[must_use]
    pub fn from_or_map(or_map: OrMap) -> Self {
        Self { or_map }
    }

    /// Adds `name` with quantity `qty`, returning the freshly minted id.
    pub fn add_item(&mut self, name: impl Into<String>, qty: u64) -> ItemId {
        let item_id = ItemId::new();
        self.or_map.add(item_id.clone(), name);
        self.or_map.increment_quantity(&item_id, qty);
        item_id
    }

    /// Logically removes `item_id`.
    pub fn remove_item(&mut self, item_id: &ItemId) {
        self.or_map.remove(item_id);
    }

    /// Marks `item_id` as acquired.
    pub fn mark_acquired(&mut self, item_id: &ItemId) {
        self.or_map.mark_acquired(item_id);
    }

    /// Increments `item_id`'s quantity by `value`.
    pub fn increment(&mut self, item_id: &ItemId, value: u64) {
        self.or_map.increment_quantity(item_id, value);
    }

    /// Decrements `item_id`'s quantity by `value`.
    pub fn decrement(&mut self, item_id: &ItemId, value: u64) {
        self.or_map.decrement_quantity(item_id, value);
    }

    /// Returns the effective (non-tombstoned, non-acquired) items.
    #[must_use]
    pub fn items(&self) -> HashMap<ItemId, (String, i64, bool)> {
        self.or_map.items()
    }

    /// Returns every item, including tombstoned and acquired ones.
    #[must_use]
    pub fn all_items(&self) -> HashMap<ItemId, (String, i64, bool)> {
        self.or_map.all_items()
    }

    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        self.or_map.merge(&other.or_map);
    }

    /// Returns a new list that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Direct access to the underlying OR-Map, for callers that need the
    /// tombstone/acquired accessors beyond [`ShoppingList::items`].
    #[must_use]
    pub fn or_map(&self) -> &OrMap {
        &self.or_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_sets_initial_quantity() {
        let mut list = ShoppingList::new();
        let id = list.add_item("milk", 2);
        assert_eq!(list.items()[&id], ("milk".to_string(), 2, false));
    }

    #[test]
    fn remove_then_merge_keeps_item_gone() {
        let mut a = ShoppingList::new();
        let id = a.add_item("milk", 1);
        a.remove_item(&id);

        let mut b = ShoppingList::new();
        b.merge(&a);
        assert!(!b.items().contains_key(&id));
    }

    #[test]
    fn mark_acquired_hides_item_from_default_view() {
        let mut list = ShoppingList::new();
        let id = list.add_item("bread", 1);
        list.mark_acquired(&id);
        assert!(!list.items().contains_key(&id));
    }

    #[test]
    fn merging_two_independent_lists_combines_items() {
        let mut a = ShoppingList::new();
        a.add_item("tea", 1);

        let mut b = ShoppingList::new();
        b.add_item("coffee", 1);

        let merged = a.merged(&b);
        assert_eq!(merged.items().len(), 2);
    }
}
