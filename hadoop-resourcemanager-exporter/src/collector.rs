//! ResourceManager collection passes: REST responses to metric families.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use hadoop_exporter_common::{
    Error, ExporterConfig, Fetcher, MetricFamily, MetricValue, RawRecord, Result, Snapshot,
};
use hadoop_exporter_framework::Exporter;

use crate::node_state::NodeState;
use crate::tables::{CLUSTER_METRICS_TABLE, NODE_TABLE, STATE_FIELD};

/// Path of the cluster metrics resource, relative to the ResourceManager URL.
pub const CLUSTER_METRICS_PATH: &str = "/ws/v1/cluster/metrics";
/// Path of the nodes resource, relative to the ResourceManager URL.
pub const NODES_PATH: &str = "/ws/v1/cluster/nodes";

/// Map a `/ws/v1/cluster/metrics` response.
///
/// `None` (nothing fetched) yields the declared families without samples.
/// Every table field is mandatory on the `clusterMetrics` object.
pub fn map_cluster_metrics(payload: Option<Value>, cluster: &str) -> Result<Vec<MetricFamily>> {
    let mut families = CLUSTER_METRICS_TABLE.empty_families();

    if let Some(payload) = payload {
        let metrics = match payload {
            Value::Object(mut object) => object.remove("clusterMetrics"),
            _ => None,
        }
        .ok_or_else(|| Error::missing("cluster metrics response", "clusterMetrics"))?;

        let metrics = RawRecord::from_value("clusterMetrics", metrics)?;
        for field in CLUSTER_METRICS_TABLE.fields() {
            let value = metrics.require_number(field.field)?;
            families.add(field.field, vec![cluster.to_string()], value)?;
        }
    }

    Ok(families.into_families())
}

/// Map a `/ws/v1/cluster/nodes` response.
///
/// The ResourceManager reports `{"nodes": null}` when it knows no nodes.
pub fn map_nodes(payload: Option<Value>, cluster: &str) -> Result<Vec<MetricFamily>> {
    let mut families = NODE_TABLE.empty_families();

    for node in payload.map(node_records).transpose()?.unwrap_or_default() {
        let (Some(host), Some(version)) = (node.label("nodeHostName"), node.label("version"))
        else {
            warn!(node = %node.context(), "Node has no nodeHostName or version, skipping");
            continue;
        };
        let labels = vec![cluster.to_string(), host.to_string(), version.to_string()];

        for field in NODE_TABLE.fields() {
            let value = if field.field == STATE_FIELD {
                let state: NodeState = node.require_str(STATE_FIELD)?.parse()?;
                MetricValue::Int(state.ordinal())
            } else {
                node.require_number(field.field)?
            };
            families.add(field.field, labels.clone(), value)?;
        }
    }

    Ok(families.into_families())
}

/// Unpack `nodes.node` into one record per node.
fn node_records(payload: Value) -> Result<Vec<RawRecord>> {
    let nodes = match payload {
        Value::Object(mut object) => object.remove("nodes"),
        _ => None,
    }
    .ok_or_else(|| Error::missing("nodes response", "nodes"))?;

    let node = match nodes {
        Value::Null => return Ok(Vec::new()),
        Value::Object(mut object) => object.remove("node"),
        _ => return Err(Error::invalid("nodes response", "nodes", "expected an object")),
    };

    match node {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(nodes)) => nodes
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let context = value
                    .get("id")
                    .and_then(Value::as_str)
                    .map(|id| format!("node[{}]", id))
                    .unwrap_or_else(|| format!("node[{}]", index));
                RawRecord::from_value(context, value)
            })
            .collect(),
        Some(_) => Err(Error::invalid("nodes response", "node", "expected an array")),
    }
}

/// Collector for the cluster-wide metrics resource.
#[derive(Debug, Clone)]
pub struct ClusterMetricsCollector {
    fetcher: Fetcher,
    url: String,
    cluster: String,
}

impl ClusterMetricsCollector {
    pub fn new(fetcher: Fetcher, base_url: &str, cluster: &str) -> Self {
        Self {
            fetcher,
            url: format!("{}{}", base_url, CLUSTER_METRICS_PATH),
            cluster: cluster.to_string(),
        }
    }

    pub async fn collect(&self) -> Result<Vec<MetricFamily>> {
        let payload = self.fetcher.fetch_json(&self.url).await?;
        map_cluster_metrics(payload, &self.cluster)
    }
}

/// Collector for the per-node resource.
#[derive(Debug, Clone)]
pub struct NodeCollector {
    fetcher: Fetcher,
    url: String,
    cluster: String,
}

impl NodeCollector {
    pub fn new(fetcher: Fetcher, base_url: &str, cluster: &str) -> Self {
        Self {
            fetcher,
            url: format!("{}{}", base_url, NODES_PATH),
            cluster: cluster.to_string(),
        }
    }

    pub async fn collect(&self) -> Result<Vec<MetricFamily>> {
        let payload = self.fetcher.fetch_json(&self.url).await?;
        map_nodes(payload, &self.cluster)
    }
}

/// Exporter serving both ResourceManager collectors from one endpoint.
#[derive(Debug, Clone)]
pub struct ResourceManagerExporter {
    cluster_metrics: ClusterMetricsCollector,
    nodes: NodeCollector,
}

impl ResourceManagerExporter {
    /// Create an exporter polling the configured ResourceManager.
    pub fn new(config: &ExporterConfig) -> Result<Self> {
        let fetcher = Fetcher::new(Duration::from_secs(config.upstream.timeout_secs))?;
        let base_url = config.upstream.base_url();

        Ok(Self {
            cluster_metrics: ClusterMetricsCollector::new(
                fetcher.clone(),
                base_url,
                &config.cluster,
            ),
            nodes: NodeCollector::new(fetcher, base_url, &config.cluster),
        })
    }
}

impl Exporter for ResourceManagerExporter {
    fn name(&self) -> &str {
        "resourcemanager"
    }

    async fn collect(&self) -> Result<Snapshot> {
        let (cluster_metrics, nodes) =
            tokio::join!(self.cluster_metrics.collect(), self.nodes.collect());

        let mut snapshot = Snapshot::new(cluster_metrics?);
        snapshot.extend(nodes?);

        debug!(
            families = snapshot.families().len(),
            samples = snapshot.sample_count(),
            "Mapped ResourceManager responses"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cluster_metrics_payload() -> Value {
        json!({
            "clusterMetrics": {
                "appsSubmitted": 74350,
                "appsCompleted": 74322,
                "appsPending": 0,
                "appsRunning": 10,
                "appsFailed": 2,
                "appsKilled": 16,
                "reservedMB": 515072,
                "availableMB": 493568,
                "allocatedMB": 2168832,
                "reservedVirtualCores": 108,
                "availableVirtualCores": 848,
                "allocatedVirtualCores": 452,
                "containersAllocated": 452,
                "containersReserved": 108,
                "containersPending": 53536,
                "totalMB": 2662400,
                "totalVirtualCores": 1300,
                "totalNodes": 65,
                "lostNodes": 0,
                "unhealthyNodes": 0,
                "decommissionedNodes": 0,
                "rebootedNodes": 0,
                "activeNodes": 65
            }
        })
    }

    fn node(state: &str, host: &str) -> Value {
        json!({
            "rack": "/default-rack",
            "state": state,
            "id": format!("{}:21642", host),
            "nodeHostName": host,
            "nodeHTTPAddress": format!("{}:8042", host),
            "lastHealthUpdate": 1498805490510u64,
            "version": "2.5.2",
            "healthReport": "",
            "numContainers": 3,
            "usedMemoryMB": 6144,
            "availMemoryMB": 34816,
            "usedVirtualCores": 3,
            "availableVirtualCores": 17
        })
    }

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.spec.name == name)
            .unwrap_or_else(|| panic!("missing family {}", name))
    }

    #[test]
    fn test_cluster_metrics_all_fields() {
        let families = map_cluster_metrics(Some(cluster_metrics_payload()), "c").unwrap();

        assert_eq!(families.len(), 23);
        assert!(families.iter().all(|f| f.samples.len() == 1));

        let submitted = family(&families, "hadoop_resourcemanager_apps_submitted");
        assert_eq!(submitted.samples[0].labels, vec!["c"]);
        assert_eq!(submitted.samples[0].value, MetricValue::Int(74350));
    }

    #[test]
    fn test_cluster_metrics_nothing_fetched() {
        let families = map_cluster_metrics(None, "c").unwrap();

        assert_eq!(families.len(), 23);
        assert!(families.iter().all(|f| f.samples.is_empty()));
    }

    #[test]
    fn test_cluster_metrics_missing_field_is_error() {
        let mut payload = cluster_metrics_payload();
        payload["clusterMetrics"]
            .as_object_mut()
            .unwrap()
            .remove("lostNodes");

        let err = map_cluster_metrics(Some(payload), "c").unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field, .. } if field == "lostNodes"));
    }

    #[test]
    fn test_cluster_metrics_missing_object_is_error() {
        let err = map_cluster_metrics(Some(json!({"beans": []})), "c").unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
    }

    #[test]
    fn test_nodes_mapped() {
        let payload = json!({"nodes": {"node": [node("UNHEALTHY", "h1"), node("RUNNING", "h2")]}});

        let families = map_nodes(Some(payload), "c").unwrap();

        let state = family(&families, "hadoop_resourcemanager_node_state");
        assert_eq!(state.samples.len(), 2);
        assert_eq!(state.samples[0].labels, vec!["c", "h1", "2.5.2"]);
        assert_eq!(state.samples[0].value, MetricValue::Int(3));
        assert_eq!(state.samples[1].value, MetricValue::Int(2));

        let containers = family(&families, "hadoop_resourcemanager_node_num_containers");
        assert_eq!(containers.samples[0].value, MetricValue::Int(3));

        let avail = family(&families, "hadoop_resourcemanager_node_avail_memory_mb");
        assert_eq!(avail.samples[1].value, MetricValue::Int(34816));
    }

    #[test]
    fn test_lost_node_state() {
        let payload = json!({"nodes": {"node": [node("LOST", "h1")]}});

        let families = map_nodes(Some(payload), "c").unwrap();
        let state = family(&families, "hadoop_resourcemanager_node_state");
        assert_eq!(state.samples[0].value, MetricValue::Int(5));
    }

    #[test]
    fn test_unknown_node_state_is_error() {
        let payload = json!({"nodes": {"node": [node("RUNNING", "h1"), node("WEIRD", "h2")]}});

        let err = map_nodes(Some(payload), "c").unwrap_err();
        assert!(matches!(err, Error::UnknownNodeState(ref s) if s == "WEIRD"));
    }

    #[test]
    fn test_missing_node_field_is_error() {
        let mut n = node("RUNNING", "h1");
        n.as_object_mut().unwrap().remove("usedVirtualCores");
        let payload = json!({"nodes": {"node": [n]}});

        let err = map_nodes(Some(payload), "c").unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
    }

    #[test]
    fn test_node_without_labels_skipped() {
        let mut unnamed = node("RUNNING", "h1");
        unnamed.as_object_mut().unwrap().remove("nodeHostName");
        let mut unversioned = node("RUNNING", "h2");
        unversioned["version"] = json!("");
        let payload = json!({"nodes": {"node": [unnamed, unversioned, node("NEW", "h3")]}});

        let families = map_nodes(Some(payload), "c").unwrap();

        let state = family(&families, "hadoop_resourcemanager_node_state");
        assert_eq!(state.samples.len(), 1);
        assert_eq!(state.samples[0].labels[1], "h3");
        assert_eq!(state.samples[0].value, MetricValue::Int(1));
    }

    #[test]
    fn test_no_nodes() {
        for payload in [
            json!({"nodes": null}),
            json!({"nodes": {}}),
            json!({"nodes": {"node": []}}),
        ] {
            let families = map_nodes(Some(payload), "c").unwrap();
            assert_eq!(families.len(), 6);
            assert!(families.iter().all(|f| f.samples.is_empty()));
        }
    }

    #[test]
    fn test_nodes_nothing_fetched() {
        let families = map_nodes(None, "c").unwrap();
        assert_eq!(families.len(), 6);
        assert!(families.iter().all(|f| f.samples.is_empty()));
    }

    #[test]
    fn test_nodes_missing_key_is_error() {
        let err = map_nodes(Some(json!({"clusterMetrics": {}})), "c").unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
    }

    #[test]
    fn test_map_is_idempotent() {
        let payload = json!({"nodes": {"node": [node("RUNNING", "h1")]}});

        let first = map_nodes(Some(payload.clone()), "c").unwrap();
        let second = map_nodes(Some(payload), "c").unwrap();
        assert_eq!(first, second);
    }
}
