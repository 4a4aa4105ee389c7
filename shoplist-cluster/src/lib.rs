//! Cluster fabric: consistent hash ring, gossip state, and replica
//! placement for the shopping-list store.

mod consistent_hash;
mod error;
mod gossip;
mod replication;

pub use consistent_hash::ConsistentHash;
pub use error::{ClusterError, ClusterResult};
pub use gossip::{GossipState, Liveness, DEFAULT_GOSSIP_INTERVAL};
pub use replication::ReplicationManager;
