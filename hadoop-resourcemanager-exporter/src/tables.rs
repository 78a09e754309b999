//! Exported ResourceManager metrics.

use hadoop_exporter_common::{FieldSpec, MetricTable};

/// Fields of the `clusterMetrics` object. All are mandatory.
pub const CLUSTER_METRICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("appsSubmitted", "The number of applications submitted"),
    FieldSpec::new("appsCompleted", "The number of applications completed"),
    FieldSpec::new("appsPending", "The number of applications pending"),
    FieldSpec::new("appsRunning", "The number of applications running"),
    FieldSpec::new("appsFailed", "The number of applications failed"),
    FieldSpec::new("appsKilled", "The number of applications killed"),
    FieldSpec::new("reservedMB", "The amount of memory reserved in MB"),
    FieldSpec::new("availableMB", "The amount of memory available in MB"),
    FieldSpec::new("allocatedMB", "The amount of memory allocated in MB"),
    FieldSpec::new("reservedVirtualCores", "The number of reserved virtual cores"),
    FieldSpec::new("availableVirtualCores", "The number of available virtual cores"),
    FieldSpec::new("allocatedVirtualCores", "The number of allocated virtual cores"),
    FieldSpec::new("containersAllocated", "The number of containers allocated"),
    FieldSpec::new("containersReserved", "The number of containers reserved"),
    FieldSpec::new("containersPending", "The number of containers pending"),
    FieldSpec::new("totalMB", "The amount of total memory in MB"),
    FieldSpec::new("totalVirtualCores", "The total number of virtual cores"),
    FieldSpec::new("totalNodes", "The total number of nodes"),
    FieldSpec::new("lostNodes", "The number of lost nodes"),
    FieldSpec::new("unhealthyNodes", "The number of unhealthy nodes"),
    FieldSpec::new("decommissionedNodes", "The number of nodes decommissioned"),
    FieldSpec::new("rebootedNodes", "The number of nodes rebooted"),
    FieldSpec::new("activeNodes", "The number of active nodes"),
];

/// Node field projected through [`NodeState`](crate::NodeState).
pub const STATE_FIELD: &str = "state";

/// Fields of each element of `nodes.node`.
pub const NODE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        STATE_FIELD,
        "State of the node - valid values are: NEW, RUNNING, UNHEALTHY, DECOMMISSIONED, LOST, REBOOTED",
    ),
    FieldSpec::new(
        "numContainers",
        "The total number of containers currently running on the node",
    ),
    FieldSpec::new(
        "usedMemoryMB",
        "The total amount of memory currently used on the node (in MB)",
    ),
    FieldSpec::new(
        "availMemoryMB",
        "The total amount of memory currently available on the node (in MB)",
    ),
    FieldSpec::new(
        "usedVirtualCores",
        "The total number of vCores currently used on the node",
    ),
    FieldSpec::new(
        "availableVirtualCores",
        "The total number of vCores available on the node",
    ),
];

pub const CLUSTER_METRICS_TABLE: MetricTable =
    MetricTable::new("hadoop_resourcemanager_", &["cluster"], CLUSTER_METRICS_FIELDS);

pub const NODE_TABLE: MetricTable = MetricTable::new(
    "hadoop_resourcemanager_node_",
    &["cluster", "host", "version"],
    NODE_FIELDS,
);
