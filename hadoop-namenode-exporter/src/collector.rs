//! NameNode collection pass: JMX beans to metric families.

use std::time::Duration;

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use hadoop_exporter_common::{ExporterConfig, FamilySet, Fetcher, RawRecord, Result, Snapshot};
use hadoop_exporter_framework::Exporter;

use crate::bean::{Bean, BeanKind, parse_beans};
use crate::tables::{DATANODE_TABLE, NAMENODE_TABLE, UP_FIELD};

/// Whether a data node was listed under `LiveNodes` or `DeadNodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Live,
    Dead,
}

impl Liveness {
    /// Key of the node map inside the NameNodeInfo bean.
    pub fn map_key(&self) -> &'static str {
        match self {
            Liveness::Live => "LiveNodes",
            Liveness::Dead => "DeadNodes",
        }
    }

    /// Value of the synthetic `up` field.
    pub fn up(&self) -> i64 {
        match self {
            Liveness::Live => 1,
            Liveness::Dead => 0,
        }
    }
}

/// Build the snapshot for one scrape from the fetched beans.
///
/// Every declared family is present in the result, with zero samples when
/// no matching bean was found.
pub fn build_snapshot(beans: &[Bean], cluster: &str) -> Result<Snapshot> {
    let mut health = NAMENODE_TABLE.empty_families();
    let mut datanodes = DATANODE_TABLE.empty_families();

    for bean in beans {
        match bean.kind {
            BeanKind::FsNamesystemState | BeanKind::FsNamesystem => {
                map_cluster_health(&bean.record, cluster, &mut health)?
            }
            BeanKind::NameNodeInfo => map_datanodes(&bean.record, cluster, &mut datanodes)?,
            BeanKind::Unrecognized => {}
        }
    }

    debug!(
        beans = beans.len(),
        health_samples = health.sample_count(),
        datanode_samples = datanodes.sample_count(),
        "Mapped NameNode beans"
    );

    let mut snapshot = Snapshot::new(health.into_families());
    snapshot.extend(datanodes.into_families());
    Ok(snapshot)
}

/// Sample every table field present on a namesystem bean.
pub fn map_cluster_health(
    bean: &RawRecord,
    cluster: &str,
    families: &mut FamilySet,
) -> Result<()> {
    for field in NAMENODE_TABLE.fields() {
        if let Some(value) = bean.number(field.field)? {
            families.add(field.field, vec![cluster.to_string()], value)?;
        }
    }
    Ok(())
}

/// Sample the live and dead data nodes listed on the NameNodeInfo bean.
pub fn map_datanodes(bean: &RawRecord, cluster: &str, families: &mut FamilySet) -> Result<()> {
    for liveness in [Liveness::Live, Liveness::Dead] {
        for (host, attributes) in decode_node_map(bean, liveness)? {
            let context = format!("{}[{}]", liveness.map_key(), host);
            let mut node = RawRecord::from_value(context, attributes)?;
            node.insert(UP_FIELD, json!(liveness.up()));
            map_datanode(&node, &host, cluster, liveness, families)?;
        }
    }
    Ok(())
}

/// Decode one of the JSON-encoded node maps. An absent map has no nodes.
fn decode_node_map(bean: &RawRecord, liveness: Liveness) -> Result<Map<String, Value>> {
    let key = liveness.map_key();
    if !bean.contains(key) {
        return Ok(Map::new());
    }

    let encoded = bean.require_str(key)?;
    Ok(serde_json::from_str(encoded)?)
}

fn map_datanode(
    node: &RawRecord,
    host: &str,
    cluster: &str,
    liveness: Liveness,
    families: &mut FamilySet,
) -> Result<()> {
    let Some(xferaddr) = node.label("xferaddr") else {
        warn!(host = %host, "Data node has no xferaddr, skipping");
        return Ok(());
    };
    if host.is_empty() {
        warn!(xferaddr = %xferaddr, "Data node has an empty host name, skipping");
        return Ok(());
    }

    let labels = vec![cluster.to_string(), host.to_string(), xferaddr.to_string()];

    for field in DATANODE_TABLE.fields() {
        // A dead node's snapshot may be partial.
        let value = match liveness {
            Liveness::Live => Some(node.require_number(field.field)?),
            Liveness::Dead => node.number(field.field)?,
        };
        if let Some(value) = value {
            families.add(field.field, labels.clone(), value)?;
        }
    }
    Ok(())
}

/// Exporter for the NameNode JMX endpoint.
#[derive(Debug, Clone)]
pub struct NameNodeExporter {
    fetcher: Fetcher,
    url: String,
    cluster: String,
}

impl NameNodeExporter {
    /// Create an exporter polling the configured JMX URL.
    pub fn new(config: &ExporterConfig) -> Result<Self> {
        let fetcher = Fetcher::new(Duration::from_secs(config.upstream.timeout_secs))?;
        Ok(Self {
            fetcher,
            url: config.upstream.base_url().to_string(),
            cluster: config.cluster.clone(),
        })
    }
}

impl Exporter for NameNodeExporter {
    fn name(&self) -> &str {
        "namenode"
    }

    async fn collect(&self) -> Result<Snapshot> {
        let beans = match self.fetcher.fetch_json(&self.url).await? {
            Some(payload) => parse_beans(payload)?,
            None => Vec::new(),
        };
        build_snapshot(&beans, &self.cluster)
    }
}
