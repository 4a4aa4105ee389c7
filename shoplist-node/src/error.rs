//! Error types for node request handling.

use shoplist_types::ErrorKind;
use thiserror::Error;

/// Result type for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

/// Errors a node's request handler can produce.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Create targeted a `list_id` that is already active.
    #[error("list {0} already exists")]
    AlreadyExists(String),

    /// Read/delete targeted a `list_id` with no local list.
    #[error("list {0} does not exist")]
    NotFound(String),

    /// Write targeted a tombstoned `list_id`.
    #[error("list {0} has been deleted")]
    Tombstoned(String),

    /// Underlying cluster (ring) error.
    #[error(transparent)]
    Cluster(#[from] shoplist_cluster::ClusterError),

    /// Underlying storage error not covered by a more specific variant.
    #[error(transparent)]
    Storage(#[from] shoplist_storage::StorageError),
}

impl NodeError {
    /// Classifies this error under the cluster-wide error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodeError::AlreadyExists(_) => ErrorKind::ClientError,
            NodeError::NotFound(_) => ErrorKind::NotFound,
            NodeError::Tombstoned(_) => ErrorKind::Conflict,
            NodeError::Cluster(e) => e.kind(),
            NodeError::Storage(e) => e.kind(),
        }
    }
}
