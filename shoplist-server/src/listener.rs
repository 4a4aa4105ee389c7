//! TCP listener loops for a node and the broker.
//!
//! Each accepted connection is handled on its own task: read a
//! length-prefixed, zlib-compressed [`Message`], dispatch it, write back the
//! [`Response`], and repeat until the peer closes the connection or a frame
//! fails to decode.

use std::sync::Arc;

use shoplist_broker::Broker;
use shoplist_node::Node;
use shoplist_protocol::{read_message, write_message, Message, Response};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

async fn serve_connection<F, Fut>(mut stream: TcpStream, handle: F)
where
    F: Fn(Message) -> Fut,
    Fut: std::future::Future<Output = Response>,
{
    loop {
        let message: Message = match read_message(&mut stream).await {
            Ok(m) => m,
            Err(e) => {
                debug!(error = %e, "connection closed or frame decode failed");
                return;
            }
        };
        let response = handle(message).await;
        if let Err(e) = write_message(&mut stream, &response).await {
            warn!(error = %e, "failed to write response");
            return;
        }
    }
}

/// Binds `addr` and serves node requests forever.
pub async fn serve_node(node: Arc<Node>, addr: std::net::SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(node = %node.node_id(), %addr, "node listening");
    serve_node_on(node, listener).await
}

/// Serves node requests forever on an already-bound listener. Split out
/// from [`serve_node`] so tests can bind an ephemeral port and learn its
/// address before the accept loop starts.
pub async fn serve_node_on(node: Arc<Node>, listener: TcpListener) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "node accepted connection");
        let node = node.clone();
        tokio::spawn(async move {
            serve_connection(stream, |message| {
                let node = node.clone();
                async move { node.handle(message).await }
            })
            .await;
        });
    }
}

/// Binds `addr` and serves broker requests forever.
pub async fn serve_broker(broker: Arc<Broker>, addr: std::net::SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "broker listening");
    serve_broker_on(broker, listener).await
}

/// Serves broker requests forever on an already-bound listener (see
/// [`serve_node_on`]).
pub async fn serve_broker_on(broker: Arc<Broker>, listener: TcpListener) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "broker accepted connection");
        let broker = broker.clone();
        tokio::spawn(async move {
            serve_connection(stream, |message| {
                let broker = broker.clone();
                async move { broker.route(message).await }
            })
            .await;
        });
    }
}
