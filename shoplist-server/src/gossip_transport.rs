//! TCP implementation of [`shoplist_node::GossipTransport`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shoplist_cluster::{ConsistentHash, GossipState, Liveness};
use shoplist_node::{GossipReply, GossipTransport};
use shoplist_protocol::{Message, NodeState, Response};
use shoplist_types::NodeId;
use tokio::sync::RwLock;

use crate::net::roundtrip;

/// Exchanges this node's liveness/ring view with a peer over TCP.
pub struct TcpGossipTransport {
    local_id: NodeId,
    ring: Arc<RwLock<ConsistentHash>>,
    gossip: Arc<RwLock<GossipState>>,
}

impl TcpGossipTransport {
    #[must_use]
    pub fn new(
        local_id: NodeId,
        ring: Arc<RwLock<ConsistentHash>>,
        gossip: Arc<RwLock<GossipState>>,
    ) -> Self {
        Self {
            local_id,
            ring,
            gossip,
        }
    }
}

#[async_trait]
impl GossipTransport for TcpGossipTransport {
    async fn exchange(&self, peer: &NodeId) -> Option<GossipReply> {
        let address = { self.ring.read().await.address_of(peer).map(str::to_string) }?;

        let node_states: HashMap<NodeId, NodeState> = {
            self.gossip
                .read()
                .await
                .states()
                .iter()
                .map(|(id, liveness)| {
                    (
                        id.clone(),
                        match liveness {
                            Liveness::Alive => NodeState::Alive,
                            Liveness::Dead => NodeState::Dead,
                        },
                    )
                })
                .collect()
        };
        let ring_payload: HashMap<String, NodeId> = {
            self.ring
                .read()
                .await
                .ring()
                .iter()
                .map(|(hash, node_id)| (hash.to_string(), node_id.clone()))
                .collect()
        };

        let message = Message::Gossip {
            node_id: self.local_id.clone(),
            node_states,
            ring: ring_payload,
        };

        match roundtrip::<_, Response>(&address, &message).await {
            Some(Response::Gossip { node_states, ring }) => {
                let node_states = node_states
                    .into_iter()
                    .map(|(id, state)| {
                        (
                            id,
                            match state {
                                NodeState::Alive => Liveness::Alive,
                                NodeState::Dead => Liveness::Dead,
                            },
                        )
                    })
                    .collect();
                let ring = ring
                    .into_iter()
                    .filter_map(|(hash, node_id)| hash.parse::<u64>().ok().map(|h| (h, node_id)))
                    .collect();
                Some(GossipReply { node_states, ring })
            }
            _ => None,
        }
    }
}
