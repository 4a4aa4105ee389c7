//! Stateless request routing.
//!
//! Mirrors the reference implementation's ROUTER-ROUTER proxy: on a frontend
//! message, `ping` is answered directly, otherwise the message's `list_id`
//! is hashed against the shared ring to find the primary and the message is
//! forwarded on the backend. The broker never inspects payload beyond that;
//! it is not itself a CRDT participant and holds no shopping-list state.

use std::sync::Arc;

use shoplist_cluster::ConsistentHash;
use shoplist_protocol::{Message, Response};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::dispatch::NodeDispatch;
use crate::error::BrokerError;

/// Routes client requests to the primary node for their `list_id`.
pub struct Broker {
    ring: Arc<RwLock<ConsistentHash>>,
    dispatch: Arc<dyn NodeDispatch>,
}

impl Broker {
    /// Creates a broker over a shared ring and a pluggable node transport.
    #[must_use]
    pub fn new(ring: Arc<RwLock<ConsistentHash>>, dispatch: Arc<dyn NodeDispatch>) -> Self {
        Self { ring, dispatch }
    }

    /// Routes a single frontend message, returning the response to relay
    /// back to the client. `ping` short-circuits without a ring lookup.
    pub async fn route(&self, message: Message) -> Response {
        if matches!(message, Message::Ping) {
            return Response::Success;
        }

        let Some(list_id) = message.list_id().cloned() else {
            return error_response(BrokerError::NoRoutingKey);
        };

        let primary = {
            let ring = self.ring.read().await;
            ring.get_node(list_id.as_str())
        };
        let primary = match primary {
            Ok(node_id) => node_id,
            Err(e) => return error_response(BrokerError::from(e)),
        };

        info!(list_id = %list_id, node = %primary, "routing request to primary");

        match self.dispatch.dispatch(&primary, message).await {
            Some(response) => response,
            None => {
                warn!(node = %primary, "primary unreachable");
                error_response(BrokerError::NodeUnreachable(primary.to_string()))
            }
        }
    }
}

fn error_response(error: BrokerError) -> Response {
    Response::Error {
        kind: error.kind().as_wire_tag().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shoplist_types::{ListId, NodeId};
    use std::sync::Mutex;

    struct RecordingDispatch {
        seen: Mutex<Vec<(NodeId, Message)>>,
        reply: Response,
    }

    #[async_trait]
    impl NodeDispatch for RecordingDispatch {
        async fn dispatch(&self, node: &NodeId, message: Message) -> Option<Response> {
            self.seen
                .lock()
                .unwrap()
                .push((node.clone(), message.clone()));
            Some(self.reply.clone())
        }
    }

    fn ring_with(nodes: &[&str]) -> Arc<RwLock<ConsistentHash>> {
        let mut ring = ConsistentHash::default();
        for n in nodes {
            ring.add_node(NodeId::new(*n));
        }
        Arc::new(RwLock::new(ring))
    }

    #[tokio::test]
    async fn ping_short_circuits_without_dispatch() {
        let dispatch = Arc::new(RecordingDispatch {
            seen: Mutex::new(Vec::new()),
            reply: Response::Success,
        });
        let broker = Broker::new(ring_with(&["node1"]), dispatch.clone());

        let response = broker.route(Message::Ping).await;
        assert!(matches!(response, Response::Success));
        assert!(dispatch.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_routes_to_ring_primary() {
        let dispatch = Arc::new(RecordingDispatch {
            seen: Mutex::new(Vec::new()),
            reply: Response::ListId {
                list_id: ListId::from_string("groceries"),
            },
        });
        let ring = ring_with(&["node1", "node2", "node3"]);
        let expected_primary = ring.read().await.get_node("groceries").unwrap();
        let broker = Broker::new(ring, dispatch.clone());

        let response = broker
            .route(Message::Read {
                list_id: ListId::from_string("groceries"),
            })
            .await;
        assert!(matches!(response, Response::ListId { .. }));

        let seen = dispatch.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, expected_primary);
    }

    #[tokio::test]
    async fn empty_ring_surfaces_as_error_response() {
        let dispatch = Arc::new(RecordingDispatch {
            seen: Mutex::new(Vec::new()),
            reply: Response::Success,
        });
        let broker = Broker::new(ring_with(&[]), dispatch);

        let response = broker
            .route(Message::Read {
                list_id: ListId::from_string("groceries"),
            })
            .await;
        assert!(matches!(response, Response::Error { .. }));
    }

    #[tokio::test]
    async fn unreachable_primary_surfaces_as_transport_error() {
        struct DeadDispatch;
        #[async_trait]
        impl NodeDispatch for DeadDispatch {
            async fn dispatch(&self, _node: &NodeId, _message: Message) -> Option<Response> {
                None
            }
        }

        let broker = Broker::new(ring_with(&["node1"]), Arc::new(DeadDispatch));
        let response = broker
            .route(Message::Read {
                list_id: ListId::from_string("groceries"),
            })
            .await;
        match response {
            Response::Error { kind, .. } => assert_eq!(kind, "transport"),
            other => panic!("expected error response, got {other:?}"),
        }
    }
}
