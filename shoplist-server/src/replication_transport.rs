//! TCP implementation of [`shoplist_node::Replicator`].

use std::sync::Arc;

use async_trait::async_trait;
use shoplist_cluster::ConsistentHash;
use shoplist_crdt::ShoppingList;
use shoplist_node::Replicator;
use shoplist_protocol::{Message, Response, ShoppingListWire};
use shoplist_types::{ListId, NodeId};
use tokio::sync::RwLock;

use crate::net::roundtrip;

/// Replicates writes/deletes to a peer node over a fresh TCP connection per
/// call, looking the peer's address up in the node's own ring view.
pub struct TcpReplicator {
    ring: Arc<RwLock<ConsistentHash>>,
}

impl TcpReplicator {
    #[must_use]
    pub fn new(ring: Arc<RwLock<ConsistentHash>>) -> Self {
        Self { ring }
    }
}

#[async_trait]
impl Replicator for TcpReplicator {
    async fn replicate_to_node(
        &self,
        node: &NodeId,
        list_id: &ListId,
        list: Option<&ShoppingList>,
    ) -> bool {
        let address = { self.ring.read().await.address_of(node).map(str::to_string) };
        let Some(address) = address else {
            return false;
        };

        let message = Message::Replicate {
            list_id: list_id.clone(),
            shopping_list: list.map(ShoppingListWire::from),
        };

        matches!(
            roundtrip::<_, Response>(&address, &message).await,
            Some(Response::Success)
        )
    }
}
