//! The periodic gossip task.
//!
//! One task per node; every [`shoplist_cluster::DEFAULT_GOSSIP_INTERVAL`] it
//! exchanges liveness/ring state with each peer in `known_nodes` through a
//! pluggable [`GossipTransport`], then folds the response into the shared
//! gossip state and ring — the same engine/transport split as
//! [`crate::replicator::Replicator`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shoplist_cluster::{ConsistentHash, GossipState, Liveness};
use shoplist_types::NodeId;
use tokio::sync::RwLock;
use tracing::warn;

/// A peer's gossip response: its reported liveness map and ring.
pub struct GossipReply {
    pub node_states: HashMap<NodeId, Liveness>,
    pub ring: Vec<(u64, NodeId)>,
}

/// Exchanges gossip payloads with peers over whatever transport the
/// orchestrator wires up.
#[async_trait]
pub trait GossipTransport: Send + Sync {
    /// Sends this node's gossip payload to `peer` and returns its reply, or
    /// `None` if the peer could not be reached.
    async fn exchange(&self, peer: &NodeId) -> Option<GossipReply>;
}

/// Runs gossip rounds against `known_nodes` forever, at `interval`, until
/// the returned task is aborted.
pub fn spawn_gossip_loop(
    local_id: NodeId,
    known_nodes: Vec<NodeId>,
    ring: Arc<RwLock<ConsistentHash>>,
    gossip: Arc<RwLock<GossipState>>,
    transport: Arc<dyn GossipTransport>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            for peer in &known_nodes {
                if *peer == local_id {
                    continue;
                }
                match transport.exchange(peer).await {
                    Some(reply) => {
                        let mut ring = ring.write().await;
                        let mut gossip = gossip.write().await;
                        gossip.record_success(peer, &mut ring);
                        gossip.merge_remote_states(&reply.node_states, &mut ring);
                        gossip.merge_remote_ring(&mut ring, &reply.ring);
                    }
                    None => {
                        warn!(node = %local_id, peer = %peer, "gossip exchange failed, marking dead");
                        let mut ring = ring.write().await;
                        let mut gossip = gossip.write().await;
                        gossip.record_failure(peer, &mut ring);
                    }
                }
            }
        }
    })
}
