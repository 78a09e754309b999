//! Prometheus exporter for the Hadoop HDFS NameNode.
//!
//! Polls the NameNode JMX servlet on every scrape and exports:
//!
//! - cluster health counters from the `FSNamesystemState` / `FSNamesystem`
//!   beans as `hadoop_namenode_*{cluster}`
//! - per data node attributes from the `NameNodeInfo` bean as
//!   `hadoop_datanode_node_*{cluster, host, xferaddr}`, including a
//!   synthetic `up` gauge (1 for live nodes, 0 for dead ones)

pub mod bean;
pub mod collector;
pub mod tables;

pub use collector::{NameNodeExporter, build_snapshot};

/// Default JMX endpoint of a NameNode.
pub const DEFAULT_URL: &str = "http://localhost:50070/jmx";
