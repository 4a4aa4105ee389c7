//! Cluster configuration: node count, ports, replication and ring tuning,
//! gossip cadence. Loaded from an optional TOML file and then overridden by
//! individual CLI flags, in the same file-plus-flags layering the teacher
//! uses for its own config.

use std::path::Path;

use serde::{Deserialize, Serialize};

fn default_node_count() -> usize {
    5
}
fn default_base_port() -> u16 {
    5001
}
fn default_broker_port() -> u16 {
    5558
}
fn default_replication_factor() -> usize {
    3
}
fn default_ring_replicas() -> u32 {
    3
}
fn default_ring_hash_bits() -> u32 {
    32
}
fn default_gossip_interval_secs() -> u64 {
    10
}

/// Static description of a cluster to stand up: how many nodes, where they
/// listen, and the replication/ring/gossip parameters they share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_node_count")]
    pub node_count: usize,
    #[serde(default = "default_base_port")]
    pub base_port: u16,
    #[serde(default = "default_broker_port")]
    pub broker_port: u16,
    #[serde(default = "default_replication_factor")]
    pub replication_factor: usize,
    #[serde(default = "default_ring_replicas")]
    pub ring_replicas: u32,
    #[serde(default = "default_ring_hash_bits")]
    pub ring_hash_bits: u32,
    #[serde(default = "default_gossip_interval_secs")]
    pub gossip_interval_secs: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            node_count: default_node_count(),
            base_port: default_base_port(),
            broker_port: default_broker_port(),
            replication_factor: default_replication_factor(),
            ring_replicas: default_ring_replicas(),
            ring_hash_bits: default_ring_hash_bits(),
            gossip_interval_secs: default_gossip_interval_secs(),
        }
    }
}

impl ClusterConfig {
    /// Loads a config from a TOML file, falling back to defaults for any
    /// field the file omits.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Node ids for this cluster, in the `node1..nodeN` convention the
    /// default address scheme derives ports from.
    #[must_use]
    pub fn node_ids(&self) -> Vec<shoplist_types::NodeId> {
        (1..=self.node_count)
            .map(|i| shoplist_types::NodeId::new(format!("node{i}")))
            .collect()
    }

    /// The TCP port `node_id` listens on, under the default
    /// `base_port + (index - 1)` convention.
    #[must_use]
    pub fn port_for(&self, index: usize) -> u16 {
        self.base_port + index as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_five_nodes() {
        let config = ClusterConfig::default();
        assert_eq!(config.node_ids().len(), 5);
        assert_eq!(config.node_ids()[0].as_str(), "node1");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: ClusterConfig = toml::from_str("node_count = 3\n").unwrap();
        assert_eq!(config.node_count, 3);
        assert_eq!(config.replication_factor, default_replication_factor());
    }
}
