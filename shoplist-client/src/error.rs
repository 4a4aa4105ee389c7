//! Error types for the client stub.

use shoplist_types::ErrorKind;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors a client operation can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A ping check failed; no request was sent.
    #[error("server is not available")]
    ServerUnavailable,

    /// The broker/node returned an `{error: kind, message}` response.
    #[error("{message}")]
    Remote { kind: String, message: String },

    /// The response did not match the shape the operation expected.
    #[error("unexpected response for this operation")]
    UnexpectedResponse,

    /// Underlying wire protocol error.
    #[error(transparent)]
    Protocol(#[from] shoplist_protocol::ProtocolError),
}

impl ClientError {
    /// Classifies this error under the cluster-wide error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::ServerUnavailable => ErrorKind::Transport,
            ClientError::Remote { .. } => ErrorKind::ClientError,
            ClientError::UnexpectedResponse => ErrorKind::Internal,
            ClientError::Protocol(e) => e.kind(),
        }
    }
}
