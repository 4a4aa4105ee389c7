//! Shared error taxonomy (§7 of the design).
//!
//! Each crate defines its own `thiserror` error enum for the errors it can
//! actually produce, but every variant maps onto one of these five kinds so
//! that node handlers and the broker can classify failures uniformly without
//! depending on each other's concrete error types.

use serde::{Deserialize, Serialize};

/// The five error categories recognized by the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed request: unknown operation, missing `list_id`, etc.
    ClientError,
    /// Read/delete for a list that does not exist on the primary.
    NotFound,
    /// Write to a tombstoned `list_id`.
    Conflict,
    /// Peer unreachable, decode failure, timeout.
    Transport,
    /// Merge invariant violation — should be unreachable.
    Internal,
}

impl ErrorKind {
    /// The lowercase tag used in `{error: kind, message: str}` wire responses.
    #[must_use]
    pub fn as_wire_tag(&self) -> &'static str {
        match self {
            ErrorKind::ClientError => "client_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Transport => "transport",
            ErrorKind::Internal => "internal",
        }
    }
}
