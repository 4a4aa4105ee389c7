//! Error types for the wire codec.

use shoplist_types::ErrorKind;
use thiserror::Error;

/// Result type for codec operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding a wire message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame's length prefix declared more bytes than the configured
    /// maximum message size.
    #[error("message too large: {0} bytes")]
    MessageTooLarge(usize),

    /// zlib inflate/deflate failed.
    #[error("compression error: {0}")]
    Compression(String),

    /// JSON encode/decode failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying stream returned an I/O error.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    /// Classifies this error under the cluster-wide error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProtocolError::MessageTooLarge(_)
            | ProtocolError::Compression(_)
            | ProtocolError::Io(_) => ErrorKind::Transport,
            ProtocolError::Serialization(_) => ErrorKind::ClientError,
        }
    }
}
