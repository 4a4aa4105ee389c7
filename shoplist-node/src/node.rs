//! The per-node request handler.
//!
//! Dispatches a tagged [`Message`] to the matching operation. Request
//! handling itself is synchronous with respect to local CRDT state — merges
//! never await — but the node then spawns background tasks to fan the
//! write out to successor replicas, matching the "handler is logically
//! single-threaded, I/O is not" split described in the concurrency model.

use std::collections::HashMap;
use std::sync::Arc;

use shoplist_cluster::{ConsistentHash, GossipState, Liveness, ReplicationManager};
use shoplist_protocol::{Message, NodeState, Response};
use shoplist_storage::ShoppingListManager;
use shoplist_types::{ListId, NodeId};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::NodeError;
use crate::replicator::Replicator;

/// A single cluster node: its identity, shared ring, replication policy,
/// local storage, gossip state, and a pluggable replicator.
pub struct Node {
    node_id: NodeId,
    ring: Arc<RwLock<ConsistentHash>>,
    replication: ReplicationManager,
    storage: Arc<RwLock<ShoppingListManager>>,
    gossip: Arc<RwLock<GossipState>>,
    replicator: Arc<dyn Replicator>,
}

impl Node {
    /// Creates a new node wired to shared cluster state.
    pub fn new(
        node_id: NodeId,
        ring: Arc<RwLock<ConsistentHash>>,
        replication: ReplicationManager,
        storage: Arc<RwLock<ShoppingListManager>>,
        gossip: Arc<RwLock<GossipState>>,
        replicator: Arc<dyn Replicator>,
    ) -> Self {
        Self {
            node_id,
            ring,
            replication,
            storage,
            gossip,
            replicator,
        }
    }

    /// Returns this node's id.
    #[must_use]
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Dispatches `message` to the matching handler and, for `write`/
    /// `delete`, spawns background replication fan-out afterward.
    pub async fn handle(&self, message: Message) -> Response {
        match message {
            Message::Create { list_id } => self.handle_create(list_id).await,
            Message::Read { list_id } => self.handle_read(list_id).await,
            Message::Write {
                list_id,
                shopping_list,
            } => {
                let incoming = shoplist_crdt::ShoppingList::from(&shopping_list);
                let response = self.handle_write(list_id.clone(), &incoming).await;
                if matches!(response, Response::ShoppingList { .. }) {
                    self.spawn_replication(list_id).await;
                }
                response
            }
            Message::Delete { list_id } => {
                let response = self.handle_delete(list_id.clone()).await;
                if matches!(response, Response::ListId { .. }) {
                    self.spawn_replication(list_id).await;
                }
                response
            }
            Message::Replicate {
                list_id,
                shopping_list,
            } => {
                let incoming = shopping_list.as_ref().map(shoplist_crdt::ShoppingList::from);
                self.handle_replicate(list_id, incoming).await
            }
            Message::Gossip {
                node_id,
                node_states,
                ring,
            } => self.handle_gossip(node_id, node_states, ring).await,
            Message::Ping => Response::Success,
        }
    }

    async fn handle_create(&self, list_id: ListId) -> Response {
        let mut storage = self.storage.write().await;
        match storage.create(list_id.clone()) {
            Ok(()) => {
                info!(node = %self.node_id, list_id = %list_id, "created shopping list");
                Response::ListId { list_id }
            }
            Err(e) => error_response(NodeError::from(e)),
        }
    }

    async fn handle_read(&self, list_id: ListId) -> Response {
        let storage = self.storage.read().await;
        match storage.get(&list_id) {
            Some(list) => Response::ShoppingList {
                shopping_list: (list).into(),
            },
            None => error_response(NodeError::NotFound(list_id.to_string())),
        }
    }

    async fn handle_write(
        &self,
        list_id: ListId,
        incoming: &shoplist_crdt::ShoppingList,
    ) -> Response {
        let mut storage = self.storage.write().await;
        match storage.write(&list_id, incoming) {
            Ok(()) => {
                let list = storage.get(&list_id).expect("just written");
                Response::ShoppingList {
                    shopping_list: list.into(),
                }
            }
            Err(e) => error_response(NodeError::from(e)),
        }
    }

    async fn handle_delete(&self, list_id: ListId) -> Response {
        let mut storage = self.storage.write().await;
        match storage.delete(&list_id) {
            Ok(()) => Response::ListId { list_id },
            Err(e) => error_response(NodeError::from(e)),
        }
    }

    async fn handle_replicate(
        &self,
        list_id: ListId,
        incoming: Option<shoplist_crdt::ShoppingList>,
    ) -> Response {
        let mut storage = self.storage.write().await;
        let result = match incoming {
            // `write` already creates the list if absent; a tombstoned id
            // must stay deleted rather than being resurrected here.
            Some(list) => storage.write(&list_id, &list),
            None => storage.delete(&list_id).or(Ok(())),
        };
        match result {
            Ok(()) => Response::Success,
            Err(e) => {
                warn!(node = %self.node_id, list_id = %list_id, error = %e, "replication failed");
                Response::Error {
                    kind: NodeError::from(e).kind().as_wire_tag().to_string(),
                    message: "replication failed".to_string(),
                }
            }
        }
    }

    async fn handle_gossip(
        &self,
        peer: NodeId,
        remote_states: HashMap<NodeId, NodeState>,
        remote_ring: HashMap<String, NodeId>,
    ) -> Response {
        let remote_liveness: HashMap<NodeId, Liveness> = remote_states
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

        let mut ring = self.ring.write().await;
        let mut gossip = self.gossip.write().await;
        gossip.merge_remote_states(&remote_liveness, &mut ring);

        let ring_entries: Vec<(u64, NodeId)> = remote_ring
            .into_iter()
            .filter_map(|(hash, node_id)| hash.parse::<u64>().ok().map(|h| (h, node_id)))
            .collect();
        gossip.merge_remote_ring(&mut ring, &ring_entries);

        info!(node = %self.node_id, peer = %peer, "gossip round processed");

        let node_states = gossip
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
            .collect();
        let wire_ring = ring
            .ring()
            .iter()
            .map(|(hash, node_id)| (hash.to_string(), node_id.clone()))
            .collect();

        Response::Gossip {
            node_states,
            ring: wire_ring,
        }
    }

    async fn spawn_replication(&self, list_id: ListId) {
        let successors = {
            let ring = self.ring.read().await;
            self.replication.successors_for(&ring, list_id.as_str())
        };
        let successors = match successors {
            Ok(s) => s,
            Err(e) => {
                warn!(node = %self.node_id, error = %e, "could not resolve replicas");
                return;
            }
        };

        for replica in successors {
            if replica == self.node_id {
                continue;
            }
            let storage = self.storage.clone();
            let replicator = self.replicator.clone();
            let list_id = list_id.clone();
            let this_node = self.node_id.clone();
            tokio::spawn(async move {
                let list = storage.read().await.get(&list_id).cloned();
                let ok = replicator
                    .replicate_to_node(&replica, &list_id, list.as_ref())
                    .await;
                if !ok {
                    warn!(node = %this_node, replica = %replica, list_id = %list_id, "replication failed, will heal on next write");
                }
            });
        }
    }
}

fn error_response(error: NodeError) -> Response {
    Response::Error {
        kind: error.kind().as_wire_tag().to_string(),
        message: error.to_string(),
    }
}
