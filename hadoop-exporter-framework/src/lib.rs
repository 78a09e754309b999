//! Hadoop Exporter Framework
//!
//! Common plumbing shared by the exporter binaries.
//!
//! # Overview
//!
//! This framework provides:
//! - [`Exporter`] trait implemented by each daemon's collector
//! - [`ExporterArgs`] for common CLI argument parsing (the single-dash
//!   `-url <url>` spelling is still accepted alongside `-u` and `--url`)
//! - [`HttpServer`] serving the metrics and health endpoints
//! - [`ExporterRunner`] for logging setup and signal-driven shutdown
//!
//! # Example
//!
//! ```ignore
//! use hadoop_exporter_framework::{ExporterArgs, ExporterRunner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = ExporterArgs::parse_for("my-exporter", "Export my daemon");
//!     let config = args.into_config("http://localhost:8088")?;
//!     let runner = ExporterRunner::new("mine", config)?;
//!     let exporter = MyExporter::new(runner.config())?;
//!     runner.run(exporter).await
//! }
//! ```

mod args;
mod exporter;
pub mod http;
mod runner;

pub use args::ExporterArgs;
pub use exporter::Exporter;
pub use http::{HttpServer, create_router};
pub use runner::ExporterRunner;

// Re-export commonly used types from hadoop-exporter-common
pub use hadoop_exporter_common::{ExporterConfig, Result, Snapshot};
