//! Consistent hash ring with virtual nodes.
//!
//! Each physical node is placed `replicas` times on the ring, at
//! `SHA-256("{node_id}-{i}") mod 2^hash_bits`. Lookups walk the sorted ring
//! for the first slot at or after the key's hash, wrapping to the first slot
//! if none is found — the same first-successor rule as a classic consistent
//! hash, implemented here with a `BTreeMap` range scan instead of a
//! bisect-on-a-sorted-vec.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shoplist_types::NodeId;
use std::collections::BTreeMap;

use crate::error::{ClusterError, ClusterResult};

const DEFAULT_REPLICAS: u32 = 3;
const DEFAULT_HASH_BITS: u32 = 32;

/// A consistent hash ring mapping keys to physical node ids via virtual
/// nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistentHash {
    replicas: u32,
    hash_mask: u64,
    ring: BTreeMap<u64, NodeId>,
    /// Physical nodes in insertion order — `ReplicationManager` walks this
    /// order rather than ring-successor order (see crate docs).
    node_order: Vec<NodeId>,
    addresses: BTreeMap<NodeId, String>,
}

impl Default for ConsistentHash {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICAS, DEFAULT_HASH_BITS)
    }
}

impl ConsistentHash {
    /// Creates an empty ring with `replicas` virtual nodes per physical node
    /// and a `hash_bits`-wide hash space.
    #[must_use]
    pub fn new(replicas: u32, hash_bits: u32) -> Self {
        let hash_mask = if hash_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << hash_bits) - 1
        };
        Self {
            replicas,
            hash_mask,
            ring: BTreeMap::new(),
            node_order: Vec::new(),
            addresses: BTreeMap::new(),
        }
    }

    fn hash(&self, key: &str) -> u64 {
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[24..32]);
        u64::from_be_bytes(bytes) & self.hash_mask
    }

    /// Adds `node_id` and its virtual replicas to the ring, deriving its
    /// address from the default `tcp://127.0.0.1:{5000 + last_digit}`
    /// convention. No-op if already present.
    pub fn add_node(&mut self, node_id: NodeId) {
        self.add_node_with_address(
            node_id.clone(),
            format!("tcp://127.0.0.1:{}", 5000 + node_id.last_digit()),
        );
    }

    /// Adds `node_id` with an explicit address, overriding the default
    /// convention (see §4.12's per-node override).
    pub fn add_node_with_address(&mut self, node_id: NodeId, address: String) {
        if !self.addresses.contains_key(&node_id) {
            self.node_order.push(node_id.clone());
        }
        self.addresses.insert(node_id.clone(), address);
        for i in 0..self.replicas {
            let replica_key = format!("{node_id}-{i}");
            let hash_key = self.hash(&replica_key);
            self.ring.insert(hash_key, node_id.clone());
        }
    }

    /// Removes `node_id` and its virtual replicas from the ring.
    pub fn remove_node(&mut self, node_id: &NodeId) {
        self.addresses.remove(node_id);
        self.node_order.retain(|id| id != node_id);
        for i in 0..self.replicas {
            let replica_key = format!("{node_id}-{i}");
            let hash_key = self.hash(&replica_key);
            self.ring.remove(&hash_key);
        }
    }

    /// Returns the node responsible for `key`: the first ring slot at or
    /// after `H(key)`, wrapping to the first slot if none is found.
    pub fn get_node(&self, key: &str) -> ClusterResult<NodeId> {
        if self.ring.is_empty() {
            return Err(ClusterError::EmptyRing);
        }
        let hash_key = self.hash(key);
        let node = self
            .ring
            .range(hash_key..)
            .next()
            .or_else(|| self.ring.iter().next())
            .map(|(_, node)| node.clone())
            .expect("ring is non-empty");
        Ok(node)
    }

    /// Returns physical node ids in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Returns the address registered for `node_id`, if known.
    #[must_use]
    pub fn address_of(&self, node_id: &NodeId) -> Option<&str> {
        self.addresses.get(node_id).map(String::as_str)
    }

    /// Returns the raw ring contents, for gossip exchange: `hash → node_id`.
    #[must_use]
    pub fn ring(&self) -> &BTreeMap<u64, NodeId> {
        &self.ring
    }

    /// Installs a single `(hash, node_id)` ring slot as observed from a
    /// gossip peer, registering the node's address if not already known.
    pub fn install_ring_entry(&mut self, hash: u64, node_id: NodeId, address: Option<String>) {
        if !self.addresses.contains_key(&node_id) {
            self.node_order.push(node_id.clone());
            self.addresses.insert(
                node_id.clone(),
                address.unwrap_or_else(|| format!("tcp://127.0.0.1:{}", 5000 + node_id.last_digit())),
            );
        }
        self.ring.insert(hash, node_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with(nodes: &[&str]) -> ConsistentHash {
        let mut ring = ConsistentHash::default();
        for n in nodes {
            ring.add_node(NodeId::new(*n));
        }
        ring
    }

    #[test]
    fn empty_ring_lookup_errors() {
        let ring = ConsistentHash::default();
        assert!(matches!(ring.get_node("x"), Err(ClusterError::EmptyRing)));
    }

    #[test]
    fn get_node_is_deterministic_for_a_fixed_ring() {
        let ring = ring_with(&["node1", "node2", "node3", "node4", "node5"]);
        let a = ring.get_node("list-42").unwrap();
        let b = ring.get_node("list-42").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn get_node_returns_a_node_present_in_nodes() {
        let ring = ring_with(&["node1", "node2", "node3"]);
        let node = ring.get_node("anything").unwrap();
        assert!(ring.nodes().contains(&node));
    }

    #[test]
    fn removing_and_readding_a_node_restores_original_mapping() {
        let mut ring = ring_with(&["node1", "node2", "node3", "node4", "node5"]);
        let before = ring.get_node("list-42").unwrap();

        ring.remove_node(&NodeId::new("node3"));
        ring.add_node(NodeId::new("node3"));

        let after = ring.get_node("list-42").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn nodes_preserves_insertion_order() {
        let ring = ring_with(&["node3", "node1", "node2"]);
        assert_eq!(
            ring.nodes(),
            &[NodeId::new("node3"), NodeId::new("node1"), NodeId::new("node2")]
        );
    }

    #[test]
    fn add_node_derives_default_address_from_last_digit() {
        let ring = ring_with(&["node7"]);
        assert_eq!(
            ring.address_of(&NodeId::new("node7")),
            Some("tcp://127.0.0.1:5007")
        );
    }
}
