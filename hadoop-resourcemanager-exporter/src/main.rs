//! Hadoop ResourceManager Prometheus exporter.

use hadoop_exporter_framework::{ExporterArgs, ExporterRunner};
use hadoop_resourcemanager_exporter::{DEFAULT_URL, ResourceManagerExporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ExporterArgs::parse_for(
        "hadoop-resourcemanager-exporter",
        "Export Hadoop ResourceManager REST metrics for Prometheus",
    );
    let config = args.into_config(DEFAULT_URL)?;

    let runner = ExporterRunner::new("resourcemanager", config)?;
    let exporter = ResourceManagerExporter::new(runner.config())?;

    runner.run(exporter).await
}
