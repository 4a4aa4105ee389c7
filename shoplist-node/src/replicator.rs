//! Replica fan-out.
//!
//! The handler only decides *who* to replicate to (via
//! [`shoplist_cluster::ReplicationManager`]); *how* a replica is reached is
//! abstracted behind [`Replicator`] so the handler stays transport-agnostic,
//! mirroring the teacher's split between `SyncEngine` (pure logic) and
//! `SyncTransport` (the trait an orchestrator implements for a concrete
//! wire).

use async_trait::async_trait;
use shoplist_crdt::ShoppingList;
use shoplist_types::{ListId, NodeId};

/// Sends a best-effort replication write to a peer node.
#[async_trait]
pub trait Replicator: Send + Sync {
    /// Replicates `list` (or a deletion, if `None`) for `list_id` to
    /// `node`. Returns `true` iff the peer acknowledged success.
    async fn replicate_to_node(
        &self,
        node: &NodeId,
        list_id: &ListId,
        list: Option<&ShoppingList>,
    ) -> bool;
}

/// A [`Replicator`] that does nothing and reports success — useful for
/// single-node deployments and tests that don't exercise the network path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReplicator;

#[async_trait]
impl Replicator for NoopReplicator {
    async fn replicate_to_node(
        &self,
        _node: &NodeId,
        _list_id: &ListId,
        _list: Option<&ShoppingList>,
    ) -> bool {
        true
    }
}
