//! Hadoop NameNode Prometheus exporter.

use hadoop_exporter_framework::{ExporterArgs, ExporterRunner};
use hadoop_namenode_exporter::{DEFAULT_URL, NameNodeExporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ExporterArgs::parse_for(
        "hadoop-namenode-exporter",
        "Export Hadoop NameNode JMX metrics for Prometheus",
    );
    let config = args.into_config(DEFAULT_URL)?;

    let runner = ExporterRunner::new("namenode", config)?;
    let exporter = NameNodeExporter::new(runner.config())?;

    runner.run(exporter).await
}
