//! Wire schema for shopping lists and cluster operations.
//!
//! Every message on the wire is a JSON object carrying a mandatory
//! `operation` tag plus operation-specific fields, then zlib-compressed
//! before being length-prefixed onto the stream (see [`crate::codec`]).
//! A [`ShoppingList`] is flattened to [`ShoppingListWire`] for transport,
//! replacing the reference implementation's language-specific pickling of
//! live objects with an explicit, `serde`-validated schema.

use serde::{Deserialize, Serialize};
use shoplist_crdt::{OrMap, OrMapEntry, PnCounter, ShoppingList};
use shoplist_types::{ListId, NodeId};
use std::collections::HashMap;

/// The wire representation of a single OR-Map entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemWire {
    pub name: String,
    pub pn: PnWire,
    pub acquired: bool,
}

/// The wire representation of a [`PnCounter`]'s raw components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PnWire {
    pub p: u64,
    pub n: u64,
}

/// The wire representation of a [`ShoppingList`]'s underlying OR-Map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShoppingListWire {
    pub add_map: HashMap<String, ItemWire>,
    pub removed_map: HashMap<String, ItemWire>,
    pub acquired_map: HashMap<String, ItemWire>,
}

fn entries_to_wire(entries: &HashMap<shoplist_types::ItemId, OrMapEntry>) -> HashMap<String, ItemWire> {
    entries
        .iter()
        .map(|(id, (name, counter, acquired))| {
            let (p, n) = counter.components();
            (
                id.to_string(),
                ItemWire {
                    name: name.clone(),
                    pn: PnWire { p, n },
                    acquired: *acquired,
                },
            )
        })
        .collect()
}

fn wire_to_entries(
    wire: &HashMap<String, ItemWire>,
) -> HashMap<shoplist_types::ItemId, OrMapEntry> {
    wire.iter()
        .filter_map(|(id, item)| {
            let item_id: shoplist_types::ItemId = id.parse().ok()?;
            let mut counter = PnCounter::new();
            counter.increment(item.pn.p);
            counter.decrement(item.pn.n);
            Some((item_id, (item.name.clone(), counter, item.acquired)))
        })
        .collect()
}

impl From<&ShoppingList> for ShoppingListWire {
    fn from(list: &ShoppingList) -> Self {
        let or_map = list.or_map();
        Self {
            add_map: entries_to_wire(or_map.raw_add_map()),
            removed_map: entries_to_wire(or_map.raw_removed_map()),
            acquired_map: entries_to_wire(or_map.raw_acquired_map()),
        }
    }
}

impl From<&ShoppingListWire> for ShoppingList {
    fn from(wire: &ShoppingListWire) -> Self {
        let or_map = OrMap::from_raw_parts(
            wire_to_entries(&wire.add_map),
            wire_to_entries(&wire.removed_map),
            wire_to_entries(&wire.acquired_map),
        );
        ShoppingList::from_or_map(or_map)
    }
}

/// A cluster operation, tagged by `operation` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Message {
    /// Create a new list with the given id.
    Create { list_id: ListId },
    /// Read the current state of a list.
    Read { list_id: ListId },
    /// Merge the given list state into the local copy (creating it if
    /// absent).
    Write {
        list_id: ListId,
        shopping_list: ShoppingListWire,
    },
    /// Delete a list.
    Delete { list_id: ListId },
    /// Internal replica-to-replica propagation. `shopping_list: None` means
    /// the list was deleted upstream.
    Replicate {
        list_id: ListId,
        shopping_list: Option<ShoppingListWire>,
    },
    /// Gossip exchange of node liveness and ring state.
    Gossip {
        node_id: NodeId,
        node_states: HashMap<NodeId, NodeState>,
        ring: HashMap<String, NodeId>,
    },
    /// Liveness probe.
    Ping,
}

impl Message {
    /// Returns the `list_id` this message routes on, if any. `Gossip` and
    /// `Ping` carry no routing key — they are handled (or short-circuited)
    /// by the broker before a ring lookup is needed.
    #[must_use]
    pub fn list_id(&self) -> Option<&ListId> {
        match self {
            Message::Create { list_id }
            | Message::Read { list_id }
            | Message::Write { list_id, .. }
            | Message::Delete { list_id }
            | Message::Replicate { list_id, .. } => Some(list_id),
            Message::Gossip { .. } | Message::Ping => None,
        }
    }
}

/// Liveness state of a peer as tracked by gossip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Alive,
    Dead,
}

/// A response to a [`Message`], also tagged for uniform decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Successful response carrying a list id (create/delete).
    ListId { list_id: ListId },
    /// Successful response carrying a list's merged state (read/write).
    ShoppingList { shopping_list: ShoppingListWire },
    /// Successful gossip response, echoing liveness/ring state.
    Gossip {
        node_states: HashMap<NodeId, NodeState>,
        ring: HashMap<String, NodeId>,
    },
    /// Generic success acknowledgement (replicate, pong).
    Success,
    /// Error response; `kind` is the wire tag from [`shoplist_types::ErrorKind`].
    Error { kind: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shopping_list_roundtrips_through_wire_schema() {
        let mut list = ShoppingList::new();
        let id = list.add_item("milk", 3);
        list.increment(&id, 2);

        let wire = ShoppingListWire::from(&list);
        let restored = ShoppingList::from(&wire);

        assert_eq!(restored.items(), list.items());
    }

    #[test]
    fn tombstoned_item_survives_wire_roundtrip() {
        let mut list = ShoppingList::new();
        let id = list.add_item("bread", 1);
        list.remove_item(&id);

        let wire = ShoppingListWire::from(&list);
        let restored = ShoppingList::from(&wire);

        assert!(!restored.items().contains_key(&id));
        assert!(restored.or_map().removed_items().contains_key(&id));
    }

    #[test]
    fn message_create_serializes_with_operation_tag() {
        let msg = Message::Create {
            list_id: ListId::from_string("abc"),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["operation"], "create");
        assert_eq!(json["list_id"], "abc");
    }

    #[test]
    fn message_ping_roundtrips() {
        let msg = Message::Ping;
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, Message::Ping));
    }

    #[test]
    fn list_id_extracts_routing_key_where_present() {
        let list_id = ListId::from_string("abc");
        assert_eq!(
            Message::Read {
                list_id: list_id.clone()
            }
            .list_id(),
            Some(&list_id)
        );
        assert_eq!(Message::Ping.list_id(), None);
    }
}
