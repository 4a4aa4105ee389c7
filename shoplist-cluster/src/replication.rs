//! Replica selection.
//!
//! Deliberately **not** classical Dynamo ring-successor replication: the
//! reference implementation selects replicas by walking physical nodes in
//! their *insertion order*, starting from the primary, rather than walking
//! successors around the hash ring. That deviation is preserved here rather
//! than silently "fixed" — see the design notes for the full rationale.

use crate::consistent_hash::ConsistentHash;
use crate::error::{ClusterError, ClusterResult};
use shoplist_types::NodeId;

/// Computes replica placement for keys against a [`ConsistentHash`] ring.
#[derive(Debug, Clone, Copy)]
pub struct ReplicationManager {
    replication_factor: usize,
}

impl ReplicationManager {
    /// Creates a manager targeting `replication_factor` replicas per key.
    #[must_use]
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }

    /// Returns the `replication_factor` nodes responsible for `key`: the
    /// primary (`ring.get_node(key)`) followed by the next
    /// `replication_factor - 1` distinct nodes in physical-node insertion
    /// order, wrapping around.
    pub fn replicas_for(&self, ring: &ConsistentHash, key: &str) -> ClusterResult<Vec<NodeId>> {
        let primary = ring.get_node(key)?;
        let nodes = ring.nodes();

        if nodes.len() < self.replication_factor {
            return Err(ClusterError::InsufficientNodes {
                requested: self.replication_factor,
                available: nodes.len(),
            });
        }

        let start_index = nodes
            .iter()
            .position(|n| *n == primary)
            .expect("primary came from this ring's nodes");

        Ok((0..self.replication_factor)
            .map(|i| nodes[(start_index + i) % nodes.len()].clone())
            .collect())
    }

    /// The successor replicas for `key`, excluding the primary itself — the
    /// set a node fans replication out to after a local write.
    pub fn successors_for(&self, ring: &ConsistentHash, key: &str) -> ClusterResult<Vec<NodeId>> {
        let replicas = self.replicas_for(ring, key)?;
        Ok(replicas.into_iter().skip(1).collect())
    }
}
