//! Shopping-list cluster bootstrapper.
//!
//! Stands up `node_count` nodes plus a stateless broker on fixed TCP ports,
//! wiring the pluggable replication/gossip/dispatch traits to concrete TCP
//! adapters. Each node gets its own ring view, storage, and gossip state;
//! gossip rounds are what converge the nodes' ring views over time rather
//! than a single shared mutable ring, matching the decentralized membership
//! model the cluster is built around.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use shoplist_broker::Broker;
use shoplist_cluster::{ConsistentHash, GossipState, ReplicationManager};
use shoplist_node::{spawn_gossip_loop, Node};
use shoplist_server::{serve_broker, serve_node, ClusterConfig, TcpDispatch, TcpGossipTransport, TcpReplicator};
use shoplist_storage::ShoppingListManager;
use tokio::sync::RwLock;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "shoplist-server")]
#[command(about = "Bootstraps a shopping-list cluster (nodes + broker)")]
struct Args {
    /// Optional TOML config file; CLI flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of nodes to start.
    #[arg(long)]
    node_count: Option<usize>,

    /// Base TCP port for node 1 (node `i` listens on `base_port + i - 1`).
    #[arg(long)]
    base_port: Option<u16>,

    /// Port the broker's client-facing frontend listens on.
    #[arg(long)]
    broker_port: Option<u16>,

    /// Number of replicas (including the primary) per shopping list.
    #[arg(long)]
    replication_factor: Option<usize>,

    /// Enable verbose debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let mut config = match &args.config {
        Some(path) => ClusterConfig::from_file(path).context("failed to load cluster config")?,
        None => ClusterConfig::default(),
    };
    if let Some(n) = args.node_count {
        config.node_count = n;
    }
    if let Some(p) = args.base_port {
        config.base_port = p;
    }
    if let Some(p) = args.broker_port {
        config.broker_port = p;
    }
    if let Some(f) = args.replication_factor {
        config.replication_factor = f;
    }

    info!(
        node_count = config.node_count,
        base_port = config.base_port,
        broker_port = config.broker_port,
        replication_factor = config.replication_factor,
        "starting shopping-list cluster"
    );

    let node_ids = config.node_ids();
    let mut seed_ring = ConsistentHash::new(config.ring_replicas, config.ring_hash_bits);
    for (index, node_id) in node_ids.iter().enumerate() {
        let port = config.port_for(index);
        seed_ring.add_node_with_address(node_id.clone(), format!("tcp://127.0.0.1:{port}"));
    }

    let replication = ReplicationManager::new(config.replication_factor);
    let gossip_interval = Duration::from_secs(config.gossip_interval_secs);

    for (index, node_id) in node_ids.iter().enumerate() {
        let ring = Arc::new(RwLock::new(seed_ring.clone()));
        let storage = Arc::new(RwLock::new(ShoppingListManager::new()));
        let gossip = Arc::new(RwLock::new(GossipState::new()));
        let replicator = Arc::new(TcpReplicator::new(ring.clone()));

        let node = Arc::new(Node::new(
            node_id.clone(),
            ring.clone(),
            replication,
            storage,
            gossip.clone(),
            replicator,
        ));

        let addr: SocketAddr = format!("127.0.0.1:{}", config.port_for(index)).parse()?;
        tokio::spawn(serve_node(node, addr));

        let gossip_transport = Arc::new(TcpGossipTransport::new(
            node_id.clone(),
            ring.clone(),
            gossip.clone(),
        ));
        spawn_gossip_loop(
            node_id.clone(),
            node_ids.clone(),
            ring,
            gossip,
            gossip_transport,
            gossip_interval,
        );

        info!(node = %node_id, port = config.port_for(index), "node started");
    }

    let broker_ring = Arc::new(RwLock::new(seed_ring));
    let broker = Arc::new(Broker::new(
        broker_ring.clone(),
        Arc::new(TcpDispatch::new(broker_ring)),
    ));
    let broker_addr: SocketAddr = format!("127.0.0.1:{}", config.broker_port).parse()?;
    info!(port = config.broker_port, "broker started");

    serve_broker(broker, broker_addr).await?;
    Ok(())
}
