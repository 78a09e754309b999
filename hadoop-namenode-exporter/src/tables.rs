//! Exported NameNode and DataNode metrics.

use hadoop_exporter_common::{FieldSpec, MetricTable};

/// Aggregate health counters read from the namesystem beans.
pub const CLUSTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("MissingBlocks", "MissingBlocks"),
    FieldSpec::new("CapacityTotal", "CapacityTotal"),
    FieldSpec::new("CapacityUsed", "CapacityUsed"),
    FieldSpec::new("CapacityRemaining", "CapacityRemaining"),
    FieldSpec::new("CapacityUsedNonDFS", "CapacityUsedNonDFS"),
    FieldSpec::new("TotalLoad", "TotalLoad"),
    FieldSpec::new("BlocksTotal", "BlocksTotal"),
    FieldSpec::new("FilesTotal", "FilesTotal"),
    FieldSpec::new("PendingReplicationBlocks", "PendingReplicationBlocks"),
    FieldSpec::new("UnderReplicatedBlocks", "UnderReplicatedBlocks"),
    FieldSpec::new("CorruptBlocks", "CorruptBlocks"),
    FieldSpec::new("ScheduledReplicationBlocks", "ScheduledReplicationBlocks"),
    FieldSpec::new("PendingDeletionBlocks", "PendingDeletionBlocks"),
    FieldSpec::new("ExcessBlocks", "ExcessBlocks"),
    FieldSpec::new("PostponedMisreplicatedBlocks", "PostponedMisreplicatedBlocks"),
    FieldSpec::new("PendingDataNodeMessageCount", "PendingDataNodeMessageCount"),
    FieldSpec::new("BlockCapacity", "BlockCapacity"),
    FieldSpec::new("StaleDataNodes", "StaleDataNodes"),
    FieldSpec::new("NumLiveDataNodes", "NumLiveDataNodes"),
    FieldSpec::new("NumDeadDataNodes", "NumDeadDataNodes"),
];

/// Synthetic liveness field injected into every data node.
pub const UP_FIELD: &str = "up";

/// Per data node attributes read from `LiveNodes` / `DeadNodes`.
pub const DATANODE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(UP_FIELD, "node status. 1:up, 0:down"),
    FieldSpec::new("blockPoolUsed", "blockPoolUsed"),
    FieldSpec::new("blockPoolUsedPercent", "blockPoolUsedPercent"),
    FieldSpec::new("capacity", "capacity, total space"),
    FieldSpec::new("lastContact", "lastContact"),
    FieldSpec::new("nonDfsUsedSpace", "nonDfsUsedSpace"),
    FieldSpec::new("numBlocks", "numBlocks"),
    FieldSpec::new("remaining", "remaining space"),
    FieldSpec::new("used", "used space"),
];

pub const NAMENODE_TABLE: MetricTable =
    MetricTable::new("hadoop_namenode_", &["cluster"], CLUSTER_FIELDS);

pub const DATANODE_TABLE: MetricTable = MetricTable::new(
    "hadoop_datanode_node_",
    &["cluster", "host", "xferaddr"],
    DATANODE_FIELDS,
);
