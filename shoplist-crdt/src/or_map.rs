//! Observed-Remove Map with an acquired-item lifecycle (OR-Map-with-Acquired).
//!
//! Each item lives in exactly one of three maps — `add_map` (active),
//! `removed_map` (tombstoned), `acquired_map` (purchased) — keyed by
//! [`ItemId`] and carrying `(name, PnCounter, acquired)`. Tombstoned and
//! acquired entries are also mirrored back into `add_map` so they remain
//! visible to later merges while [`OrMap::items`] filters them out.
//!
//! The merge algorithm is the centerpiece of the whole CRDT suite: it
//! collapses same-named entries that arrived under different ids (the
//! common case when two replicas independently add "milk") into a single
//! entry with a freshly minted id and a max-merged counter.

use serde::{Deserialize, Serialize};
use shoplist_types::ItemId;
use std::collections::HashMap;

use crate::pn_counter::PnCounter;

/// One entry in any of the three maps: display name, running count, and
/// whether the item has been marked as acquired.
pub type Entry = (String, PnCounter, bool);

/// An OR-Map over shopping-list items, with add/remove/acquire lifecycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrMap {
    add_map: HashMap<ItemId, Entry>,
    removed_map: HashMap<ItemId, Entry>,
    acquired_map: HashMap<ItemId, Entry>,
}

impl OrMap {
    /// Creates a new, empty OR-Map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an OR-Map from its three raw maps, as decoded off the wire.
    #[must_use]
    pub fn from_raw_parts(
        add_map: HashMap<ItemId, Entry>,
        removed_map: HashMap<ItemId, Entry>,
        acquired_map: HashMap<ItemId, Entry>,
    ) -> Self {
        Self {
            add_map,
            removed_map,
            acquired_map,
        }
    }

    /// Returns the raw `add_map`, including tombstoned/acquired mirrors, for
    /// wire encoding.
    #[must_use]
    pub fn raw_add_map(&self) -> &HashMap<ItemId, Entry> {
        &self.add_map
    }

    /// Returns the raw `removed_map` for wire encoding.
    #[must_use]
    pub fn raw_removed_map(&self) -> &HashMap<ItemId, Entry> {
        &self.removed_map
    }

    /// Returns the raw `acquired_map` for wire encoding.
    #[must_use]
    pub fn raw_acquired_map(&self) -> &HashMap<ItemId, Entry> {
        &self.acquired_map
    }

    /// Inserts `item_id` with `item_name` and a fresh `(0, 0)` counter.
    /// No-op if `item_id` is already present.
    pub fn add(&mut self, item_id: ItemId, item_name: impl Into<String>) {
        self.add_map
            .entry(item_id)
            .or_insert_with(|| (item_name.into(), PnCounter::new(), false));
    }

    /// Logically removes `item_id`: copies it into `removed_map` with its
    /// counter zeroed. No-op if absent from `add_map` or already acquired.
    pub fn remove(&mut self, item_id: &ItemId) {
        if self.acquired_map.contains_key(item_id) {
            return;
        }
        if let Some((name, mut counter, acquired)) = self.add_map.get(item_id).cloned() {
            counter.zero_out();
            self.removed_map
                .insert(item_id.clone(), (name, counter, acquired));
        }
    }

    /// Marks `item_id` as acquired. No-op if absent from `add_map` or
    /// already tombstoned.
    pub fn mark_acquired(&mut self, item_id: &ItemId) {
        if self.removed_map.contains_key(item_id) {
            return;
        }
        if let Some((name, counter, _)) = self.add_map.get(item_id).cloned() {
            self.acquired_map
                .insert(item_id.clone(), (name.clone(), counter, true));
            self.add_map.insert(item_id.clone(), (name, counter, true));
        }
    }

    /// Increments `item_id`'s quantity by `value`. No-op if absent.
    pub fn increment_quantity(&mut self, item_id: &ItemId, value: u64) {
        if let Some((_, counter, _)) = self.add_map.get_mut(item_id) {
            counter.increment(value);
        }
    }

    /// Decrements `item_id`'s quantity by `value`; removes the item if the
    /// resulting value drops to zero or below. No-op if absent.
    pub fn decrement_quantity(&mut self, item_id: &ItemId, value: u64) {
        if let Some((_, counter, _)) = self.add_map.get_mut(item_id) {
            counter.decrement(value);
            if counter.value() <= 0 {
                self.remove(item_id);
            }
        }
    }

    /// Returns the effective items: `add_map` minus anything tombstoned or
    /// acquired, as `(name, quantity, acquired)`.
    #[must_use]
    pub fn items(&self) -> HashMap<ItemId, (String, i64, bool)> {
        self.add_map
            .iter()
            .filter(|(id, _)| {
                !self.removed_map.contains_key(*id) && !self.acquired_map.contains_key(*id)
            })
            .map(|(id, (name, counter, acquired))| {
                (id.clone(), (name.clone(), counter.value(), *acquired))
            })
            .collect()
    }

    /// Returns every entry in `add_map`, including tombstoned/acquired ones.
    #[must_use]
    pub fn all_items(&self) -> HashMap<ItemId, (String, i64, bool)> {
        self.add_map
            .iter()
            .map(|(id, (name, counter, acquired))| {
                (id.clone(), (name.clone(), counter.value(), *acquired))
            })
            .collect()
    }

    /// Returns `removed_map` entries not also present in `acquired_map`.
    #[must_use]
    pub fn removed_items(&self) -> HashMap<ItemId, Entry> {
        self.removed_map
            .iter()
            .filter(|(id, _)| !self.acquired_map.contains_key(*id))
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect()
    }

    /// Returns `acquired_map` entries not also present in `removed_map`.
    pub fn acquired_items(&self) -> HashMap<ItemId, Entry> {
        self.acquired_map
            .iter()
            .filter(|(id, _)| !self.removed_map.contains_key(*id))
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect()
    }

    /// Merges `other` into `self`. Commutative, associative, idempotent
    /// across any number of peers and orderings — see the module docs for
    /// the rationale behind the name-collapse step.
    pub fn merge(&mut self, other: &Self) {
        // Step 1: live remote items, skipping anything tombstoned or
        // acquired on either side.
        let mut merged_by_name: HashMap<String, PnCounter> = HashMap::new();
        let mut merged_order: Vec<String> = Vec::new();

        for (item_id, (item_name, other_counter, _acquired)) in &other.add_map {
            if self.removed_map.contains_key(item_id)
                || self.acquired_map.contains_key(item_id)
                || other.removed_map.contains_key(item_id)
                || other.acquired_map.contains_key(item_id)
            {
                continue;
            }

            // Step 2: collapse by name against self's add_map.
            let existing_id = self
                .add_map
                .iter()
                .find(|(_, (name, _, _))| name == item_name)
                .map(|(id, _)| id.clone());

            let mut counter = *other_counter;
            if let Some(existing_id) = existing_id {
                if let Some((_, self_counter, _)) = self.add_map.remove(&existing_id) {
                    counter.merge_max(&self_counter);
                }
            }

            match merged_by_name.get_mut(item_name) {
                Some(existing) => existing.merge_max(&counter),
                None => {
                    merged_order.push(item_name.clone());
                    merged_by_name.insert(item_name.clone(), counter);
                }
            }
        }

        // Step 3: re-emit collapsed entries under fresh ids.
        for name in merged_order {
            let counter = merged_by_name[&name];
            self.add_map.insert(ItemId::new(), (name, counter, false));
        }

        // Step 4: tombstone union.
        for (item_id, (item_name, other_counter, acquired)) in &other.removed_map {
            if !self.removed_map.contains_key(item_id) {
                let mut counter = *other_counter;
                counter.zero_out();
                self.removed_map
                    .insert(item_id.clone(), (item_name.clone(), counter, *acquired));
            }
        }

        // Step 5: rehydrate tombstones into add_map.
        for (item_id, entry) in &self.removed_map {
            self.add_map.insert(item_id.clone(), entry.clone());
        }

        // Step 6: acquired union, then rehydrate into add_map.
        for (item_id, (item_name, other_counter, acquired)) in &other.acquired_map {
            match self.acquired_map.get_mut(item_id) {
                Some((_, counter, _)) => counter.merge_max(other_counter),
                None => {
                    self.acquired_map
                        .insert(item_id.clone(), (item_name.clone(), *other_counter, *acquired));
                }
            }
        }
        for (item_id, entry) in &self.acquired_map {
            self.add_map.insert(item_id.clone(), entry.clone());
        }
    }

    /// Returns a new map that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }
}
