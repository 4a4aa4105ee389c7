//! Error types for the cluster fabric (ring, gossip, replication).

use shoplist_types::ErrorKind;
use thiserror::Error;

/// Result type for cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors that can occur while operating on cluster membership/placement.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// `get_node` was called against a ring with no physical nodes.
    #[error("hash ring is empty")]
    EmptyRing,

    /// A replica lookup asked for more replicas than there are nodes.
    #[error("replication factor {requested} exceeds node count {available}")]
    InsufficientNodes { requested: usize, available: usize },

    /// A peer was unreachable during gossip or replication.
    #[error("peer {0} unreachable")]
    PeerUnreachable(String),
}

impl ClusterError {
    /// Classifies this error under the cluster-wide error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClusterError::EmptyRing | ClusterError::InsufficientNodes { .. } => {
                ErrorKind::Internal
            }
            ClusterError::PeerUnreachable(_) => ErrorKind::Transport,
        }
    }
}
