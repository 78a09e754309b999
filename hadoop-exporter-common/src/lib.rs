//! Hadoop Exporter Common Library
//!
//! Shared building blocks for the NameNode and ResourceManager exporters:
//!
//! - [`metric`] - Metric tables, families and samples
//! - [`record`] - Untyped upstream records with optional-field accessors
//! - [`fetch`] - One-shot upstream JSON fetcher
//! - [`exposition`] - Per-scrape snapshot and its Prometheus text encoding
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod exposition;
pub mod fetch;
pub mod metric;
pub mod record;

// Re-export commonly used types at the crate root
pub use config::{
    ExporterConfig, LogFormat, LoggingConfig, ServerConfig, UpstreamConfig, load_config,
    parse_config,
};
pub use error::{Error, Result};
pub use exposition::{CONTENT_TYPE, Snapshot};
pub use fetch::Fetcher;
pub use metric::{
    FamilySet, FieldSpec, MetricFamily, MetricSpec, MetricTable, MetricValue, Sample, snake_case,
};
pub use record::RawRecord;

/// Initialize tracing with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
