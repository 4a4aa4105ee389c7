//! Orchestrator: wires a [`ClusterConfig`] into running node and broker TCP
//! listeners, using concrete TCP adapters for the transport traits that
//! `shoplist-node` and `shoplist-broker` leave pluggable.

mod config;
mod dispatch_transport;
mod gossip_transport;
mod listener;
mod net;
mod replication_transport;

pub use config::ClusterConfig;
pub use dispatch_transport::TcpDispatch;
pub use gossip_transport::TcpGossipTransport;
pub use listener::{serve_broker, serve_broker_on, serve_node, serve_node_on};
pub use replication_transport::TcpReplicator;
