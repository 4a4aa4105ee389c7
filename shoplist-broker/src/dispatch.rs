//! Transport abstraction for the node hop.
//!
//! The broker decides *which* node a request belongs to (via the shared
//! ring); *how* the message actually reaches that node is abstracted behind
//! [`NodeDispatch`], the same engine/transport split used by
//! [`shoplist_node::Replicator`] and [`shoplist_node::GossipTransport`] one
//! layer down.

use async_trait::async_trait;
use shoplist_protocol::{Message, Response};
use shoplist_types::NodeId;

/// Delivers a message to a node and returns its response, or `None` if the
/// node could not be reached.
#[async_trait]
pub trait NodeDispatch: Send + Sync {
    async fn dispatch(&self, node: &NodeId, message: Message) -> Option<Response>;
}
