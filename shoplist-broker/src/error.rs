//! Error types for request routing.

use shoplist_types::ErrorKind;
use thiserror::Error;

/// Result type for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;

/// Errors the broker itself can raise, distinct from errors the routed-to
/// node returns (those pass through as-is in a [`shoplist_protocol::Response::Error`]).
#[derive(Debug, Error)]
pub enum BrokerError {
    /// A message other than `ping` carried no `list_id` to route on.
    #[error("message carries no list_id to route on")]
    NoRoutingKey,

    /// The ring could not resolve a primary for the routing key.
    #[error(transparent)]
    Cluster(#[from] shoplist_cluster::ClusterError),

    /// The resolved primary did not respond.
    #[error("node {0} unreachable")]
    NodeUnreachable(String),
}

impl BrokerError {
    /// Classifies this error under the cluster-wide error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrokerError::NoRoutingKey => ErrorKind::ClientError,
            BrokerError::Cluster(e) => e.kind(),
            BrokerError::NodeUnreachable(_) => ErrorKind::Transport,
        }
    }
}
