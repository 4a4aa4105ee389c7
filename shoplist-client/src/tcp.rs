//! A [`ClientTransport`] over a single persistent TCP connection.
//!
//! One connection is held for the client's lifetime and serialized through
//! a mutex, since requests are one-in-flight at a time (§5's "synchronous
//! request-response" client model) — there is no need for the concurrent
//! multiplexing the node-to-node codec usage might otherwise want.

use std::time::Duration;

use async_trait::async_trait;
use shoplist_protocol::{read_message, write_message, Message, Response};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::warn;

use crate::transport::ClientTransport;

/// Ping requests time out after this long before the peer is treated as
/// unreachable.
const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// Connects to a broker (or, in tests, a node) listening at a fixed TCP
/// address.
pub struct TcpTransport {
    stream: Mutex<TcpStream>,
}

impl TcpTransport {
    /// Connects to `addr` (e.g. `"127.0.0.1:5558"`).
    pub async fn connect(addr: &str) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream: Mutex::new(stream),
        })
    }

    async fn roundtrip(&self, message: &Message, timeout: Option<Duration>) -> Option<Response> {
        let mut stream = self.stream.lock().await;
        let exchange = async {
            write_message(&mut *stream, message).await.ok()?;
            read_message(&mut *stream).await.ok()
        };
        match timeout {
            Some(t) => tokio::time::timeout(t, exchange).await.ok().flatten(),
            None => exchange.await,
        }
    }
}

#[async_trait]
impl ClientTransport for TcpTransport {
    async fn request(&self, message: Message) -> Option<Response> {
        let timeout = matches!(message, Message::Ping).then_some(PING_TIMEOUT);
        let response = self.roundtrip(&message, timeout).await;
        if response.is_none() {
            warn!("request failed: no response from broker");
        }
        response
    }
}
