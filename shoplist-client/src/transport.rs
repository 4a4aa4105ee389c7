//! Pluggable delivery of a request to the broker.
//!
//! Keeps the same engine/transport split used throughout the cluster
//! ([`shoplist_node::Replicator`], [`shoplist_broker::NodeDispatch`]): the
//! client decides *what* to send, [`ClientTransport`] decides *how* it
//! reaches the broker.

use async_trait::async_trait;
use shoplist_protocol::{Message, Response};

/// Sends one request and waits for its response.
#[async_trait]
pub trait ClientTransport: Send + Sync {
    /// Returns `None` on any transport-level failure (connect, timeout,
    /// decode) — the caller treats that as "server unavailable".
    async fn request(&self, message: Message) -> Option<Response>;
}
