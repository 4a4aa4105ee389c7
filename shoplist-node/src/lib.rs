//! Per-node request handling and the background gossip/replication tasks
//! that run alongside it.

mod error;
mod gossip_task;
mod node;
mod replicator;

pub use error::{NodeError, NodeResult};
pub use gossip_task::{spawn_gossip_loop, GossipReply, GossipTransport};
pub use node::Node;
pub use replicator::{NoopReplicator, Replicator};
