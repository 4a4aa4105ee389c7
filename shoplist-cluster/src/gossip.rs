//! Gossip state — a pure state machine with no I/O.
//!
//! The actual network exchange (opening a connection, sending the compressed
//! payload, awaiting a reply) lives in `shoplist-node`, which owns the
//! transport. This module only tracks peer liveness and folds incoming
//! gossip responses into the shared ring, mirroring the engine/orchestrator
//! split used for the sync layer this crate is grounded on.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shoplist_types::NodeId;
use tracing::info;

use crate::consistent_hash::ConsistentHash;

/// Default interval between gossip rounds (`T_gossip` in the design).
pub const DEFAULT_GOSSIP_INTERVAL: Duration = Duration::from_secs(10);

/// Liveness state of a peer as tracked by gossip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liveness {
    Alive,
    Dead,
}

/// Tracks peer liveness and folds remote gossip state into the shared ring.
#[derive(Debug, Clone, Default)]
pub struct GossipState {
    node_states: HashMap<NodeId, Liveness>,
}

impl GossipState {
    /// Creates an empty gossip state (no peers observed yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently tracked liveness map.
    #[must_use]
    pub fn states(&self) -> &HashMap<NodeId, Liveness> {
        &self.node_states
    }

    /// Records a failed gossip exchange with `peer`: marks it dead and, on
    /// an alive→dead transition, removes it from `ring`.
    pub fn record_failure(&mut self, peer: &NodeId, ring: &mut ConsistentHash) {
        let was_alive = !matches!(self.node_states.get(peer), Some(Liveness::Dead));
        self.node_states.insert(peer.clone(), Liveness::Dead);
        if was_alive {
            info!(node = %peer, "node is now marked as dead");
            ring.remove_node(peer);
        }
    }

    /// Records a successful gossip exchange with `peer`: marks it alive and,
    /// on a dead→alive transition, re-adds it to `ring`.
    pub fn record_success(&mut self, peer: &NodeId, ring: &mut ConsistentHash) {
        let was_dead = matches!(self.node_states.get(peer), Some(Liveness::Dead));
        self.node_states.insert(peer.clone(), Liveness::Alive);
        if was_dead {
            info!(node = %peer, "node is now marked as alive");
            ring.add_node(peer.clone());
        }
    }

    /// Merges a peer's reported `node_states` into ours, applying the same
    /// alive/dead transition rules against `ring`.
    pub fn merge_remote_states(
        &mut self,
        remote_states: &HashMap<NodeId, Liveness>,
        ring: &mut ConsistentHash,
    ) {
        for (node, state) in remote_states {
            match state {
                Liveness::Dead => self.record_failure(node, ring),
                Liveness::Alive => self.record_success(node, ring),
            }
        }
    }

    /// Installs ring entries observed from a peer's gossip payload that are
    /// absent locally. `entries` is `(hash, node_id)` pairs as carried on
    /// the wire.
    pub fn merge_remote_ring(&self, ring: &mut ConsistentHash, entries: &[(u64, NodeId)]) {
        for (hash, node_id) in entries {
            if !ring.ring().contains_key(hash) {
                ring.install_ring_entry(*hash, node_id.clone(), None);
            }
        }
    }
}
