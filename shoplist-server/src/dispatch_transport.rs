//! TCP implementation of [`shoplist_broker::NodeDispatch`].

use std::sync::Arc;

use async_trait::async_trait;
use shoplist_broker::NodeDispatch;
use shoplist_cluster::ConsistentHash;
use shoplist_protocol::{Message, Response};
use shoplist_types::NodeId;
use tokio::sync::RwLock;

use crate::net::roundtrip;

/// Forwards a routed message to a node's TCP address.
pub struct TcpDispatch {
    ring: Arc<RwLock<ConsistentHash>>,
}

impl TcpDispatch {
    #[must_use]
    pub fn new(ring: Arc<RwLock<ConsistentHash>>) -> Self {
        Self { ring }
    }
}

#[async_trait]
impl NodeDispatch for TcpDispatch {
    async fn dispatch(&self, node: &NodeId, message: Message) -> Option<Response> {
        let address = { self.ring.read().await.address_of(node).map(str::to_string) }?;
        roundtrip(&address, &message).await
    }
}
