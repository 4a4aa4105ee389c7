//! Per-node registry of shopping lists.
//!
//! Wraps a plain `list_id → ShoppingList` map together with an
//! [`OrSet<ListId>`] tracking which ids are locally known-active versus
//! tombstoned, mirroring the source's `ShoppingListManager`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shoplist_crdt::{OrSet, ShoppingList};
use shoplist_protocol::ShoppingListWire;
use shoplist_types::ListId;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// A node's local registry of shopping lists.
#[derive(Debug, Default)]
pub struct ShoppingListManager {
    shopping_lists: HashMap<ListId, ShoppingList>,
    list_ids: OrSet<ListId>,
}

/// The on-disk snapshot format: one [`ShoppingListWire`] per active list id.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    lists: HashMap<ListId, ShoppingListWire>,
}

impl ShoppingListManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new list under `list_id`. Errors if already active.
    pub fn create(&mut self, list_id: ListId) -> StorageResult<()> {
        if self.list_ids.contains(&list_id) {
            return Err(StorageError::AlreadyExists(list_id.to_string()));
        }
        debug!(list_id = %list_id, "creating shopping list");
        self.shopping_lists.insert(list_id.clone(), ShoppingList::new());
        self.list_ids.add(list_id);
        Ok(())
    }

    /// Creates a new list under a freshly minted id, returning it.
    pub fn create_generated(&mut self) -> ListId {
        let list_id = ListId::new();
        self.shopping_lists.insert(list_id.clone(), ShoppingList::new());
        self.list_ids.add(list_id.clone());
        list_id
    }

    /// Deletes `list_id` locally, tombstoning it in the active-id set.
    pub fn delete(&mut self, list_id: &ListId) -> StorageResult<()> {
        if self.shopping_lists.remove(list_id).is_none() {
            return Err(StorageError::NotFound(list_id.to_string()));
        }
        self.list_ids.remove(list_id);
        Ok(())
    }

    /// Returns `list_id`'s shopping list, if active.
    #[must_use]
    pub fn get(&self, list_id: &ListId) -> Option<&ShoppingList> {
        self.shopping_lists.get(list_id)
    }

    /// Returns a mutable reference to `list_id`'s shopping list, if active.
    pub fn get_mut(&mut self, list_id: &ListId) -> Option<&mut ShoppingList> {
        self.shopping_lists.get_mut(list_id)
    }

    /// Merges `incoming` into the local copy of `list_id`, creating it if
    /// absent. Errors if `list_id` has been tombstoned.
    pub fn write(&mut self, list_id: &ListId, incoming: &ShoppingList) -> StorageResult<()> {
        if self.list_ids.tombstones().contains(list_id) {
            return Err(StorageError::Tombstoned(list_id.to_string()));
        }
        if !self.list_ids.contains(list_id) {
            self.shopping_lists
                .insert(list_id.clone(), ShoppingList::new());
            self.list_ids.add(list_id.clone());
        }
        let entry = self
            .shopping_lists
            .entry(list_id.clone())
            .or_insert_with(ShoppingList::new);
        entry.merge(incoming);
        Ok(())
    }

    /// Returns the ids of lists still active (not deleted).
    #[must_use]
    pub fn active_ids(&self) -> std::collections::HashSet<ListId> {
        self.list_ids.items()
    }

    /// Returns the ids of lists that have been deleted.
    #[must_use]
    pub fn removed_ids(&self) -> &std::collections::HashSet<ListId> {
        self.list_ids.tombstones()
    }

    /// Serializes every active list to a JSON snapshot.
    pub fn snapshot(&self) -> StorageResult<Vec<u8>> {
        let lists = self
            .shopping_lists
            .iter()
            .map(|(id, list)| (id.clone(), ShoppingListWire::from(list)))
            .collect();
        serde_json::to_vec_pretty(&Snapshot { lists })
            .map_err(|e| StorageError::Snapshot(e.to_string()))
    }

    /// Restores lists from a JSON snapshot produced by [`Self::snapshot`],
    /// replacing the current in-memory registry.
    pub fn restore(&mut self, bytes: &[u8]) -> StorageResult<()> {
        let snapshot: Snapshot =
            serde_json::from_slice(bytes).map_err(|e| StorageError::Snapshot(e.to_string()))?;

        self.shopping_lists.clear();
        self.list_ids = OrSet::new();
        for (list_id, wire) in snapshot.lists {
            let list = ShoppingList::from(&wire);
            self.shopping_lists.insert(list_id.clone(), list);
            self.list_ids.add(list_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_get_returns_empty_list() {
        let mut mgr = ShoppingListManager::new();
        let id = ListId::from_string("groceries");
        mgr.create(id.clone()).unwrap();
        assert!(mgr.get(&id).unwrap().items().is_empty());
    }

    #[test]
    fn create_twice_errors() {
        let mut mgr = ShoppingListManager::new();
        let id = ListId::from_string("groceries");
        mgr.create(id.clone()).unwrap();
        assert!(matches!(
            mgr.create(id),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn delete_then_write_errors_as_tombstoned() {
        let mut mgr = ShoppingListManager::new();
        let id = ListId::from_string("groceries");
        mgr.create(id.clone()).unwrap();
        mgr.delete(&id).unwrap();

        let incoming = ShoppingList::new();
        assert!(matches!(
            mgr.write(&id, &incoming),
            Err(StorageError::Tombstoned(_))
        ));
    }

    #[test]
    fn write_to_absent_list_creates_it() {
        let mut mgr = ShoppingListManager::new();
        let id = ListId::from_string("groceries");
        let mut incoming = ShoppingList::new();
        incoming.add_item("milk", 1);

        mgr.write(&id, &incoming).unwrap();
        assert_eq!(mgr.get(&id).unwrap().items().len(), 1);
    }

    #[test]
    fn snapshot_and_restore_roundtrips() {
        let mut mgr = ShoppingListManager::new();
        let id = ListId::from_string("groceries");
        mgr.create(id.clone()).unwrap();
        mgr.get_mut(&id).unwrap().add_item("milk", 2);

        let bytes = mgr.snapshot().unwrap();

        let mut restored = ShoppingListManager::new();
        restored.restore(&bytes).unwrap();

        assert_eq!(
            restored.get(&id).unwrap().items().len(),
            mgr.get(&id).unwrap().items().len()
        );
        assert!(restored.active_ids().contains(&id));
    }

    #[test]
    fn active_and_removed_ids_partition_correctly() {
        let mut mgr = ShoppingListManager::new();
        let keep = ListId::from_string("keep");
        let drop = ListId::from_string("drop");
        mgr.create(keep.clone()).unwrap();
        mgr.create(drop.clone()).unwrap();
        mgr.delete(&drop).unwrap();

        assert!(mgr.active_ids().contains(&keep));
        assert!(!mgr.active_ids().contains(&drop));
        assert!(mgr.removed_ids().contains(&drop));
    }
}
