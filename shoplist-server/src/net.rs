//! Shared TCP connect helper for the orchestrator's transport adapters.

use shoplist_protocol::{read_message, write_message, ProtocolResult};
use tokio::net::TcpStream;

/// Strips the `tcp://` scheme the address convention uses, since
/// `TcpStream::connect` wants a bare `host:port`.
fn strip_scheme(addr: &str) -> &str {
    addr.trim_start_matches("tcp://")
}

/// Connects to `addr`, sends `request`, and reads back a single response of
/// type `R`. Any I/O or decode failure collapses to `None` — transport
/// errors are the caller's cue to mark the peer unreachable.
pub async fn roundtrip<Q, R>(addr: &str, request: &Q) -> Option<R>
where
    Q: serde::Serialize,
    R: serde::de::DeserializeOwned,
{
    async fn inner<Q, R>(addr: &str, request: &Q) -> ProtocolResult<R>
    where
        Q: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let mut stream = TcpStream::connect(addr).await?;
        write_message(&mut stream, request).await?;
        read_message(&mut stream).await
    }

    inner(strip_scheme(addr), request).await.ok()
}
