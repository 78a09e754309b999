//! Prometheus exporter for the Hadoop YARN ResourceManager.
//!
//! Polls two ResourceManager REST resources on every scrape and exports:
//!
//! - `/ws/v1/cluster/metrics` as `hadoop_resourcemanager_*{cluster}`
//! - `/ws/v1/cluster/nodes` as
//!   `hadoop_resourcemanager_node_*{cluster, host, version}`, with the node
//!   state mapped to a [`NodeState`] ordinal

pub mod collector;
pub mod node_state;
pub mod tables;

pub use collector::{
    ClusterMetricsCollector, NodeCollector, ResourceManagerExporter, map_cluster_metrics,
    map_nodes,
};
pub use node_state::NodeState;

/// Default base URL of a ResourceManager.
pub const DEFAULT_URL: &str = "http://localhost:8088";
