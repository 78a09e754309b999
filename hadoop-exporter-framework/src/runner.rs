//! Exporter runner for lifecycle management.

use std::sync::Arc;
use std::time::Duration;

use hadoop_exporter_common::{ExporterConfig, init_tracing};
use tokio::sync::watch;
use tracing::{error, info};

use crate::exporter::Exporter;
use crate::http::HttpServer;

/// Runs an exporter behind the HTTP endpoint until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let config = ExporterArgs::parse_for("my-exporter", "about").into_config(DEFAULT_URL)?;
/// let runner = ExporterRunner::new("namenode", config)?;
/// let exporter = NameNodeExporter::new(runner.config())?;
/// runner.run(exporter).await
/// ```
pub struct ExporterRunner {
    name: String,
    config: ExporterConfig,
}

impl ExporterRunner {
    /// Create a runner and initialize logging from the configuration.
    pub fn new(name: impl Into<String>, config: ExporterConfig) -> anyhow::Result<Self> {
        init_tracing(&config.logging)?;
        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Serve `exporter` until a shutdown signal arrives.
    pub async fn run<E: Exporter>(self, exporter: E) -> anyhow::Result<()> {
        let listen_addr = self.config.server.listen_addr()?;

        info!(
            exporter = %self.name,
            version = env!("CARGO_PKG_VERSION"),
            upstream = %self.config.upstream.url,
            cluster = %self.config.cluster,
            listen = %listen_addr,
            "Polling {}. Serving at {}{}",
            self.config.upstream.url,
            listen_addr,
            self.config.server.path
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let server = HttpServer::new(
            Arc::new(exporter),
            listen_addr,
            self.config.server.path.clone(),
        );
        let mut http_task = tokio::spawn(async move { server.run(shutdown_rx).await });

        tokio::select! {
            result = &mut http_task => {
                // The server only returns on its own when it failed to start.
                return match result {
                    Ok(result) => result,
                    Err(e) => Err(anyhow::anyhow!("HTTP server task failed: {}", e)),
                };
            }
            signal = shutdown_signal() => {
                signal?;
            }
        }

        shutdown_tx.send(true)?;

        match tokio::time::timeout(Duration::from_secs(5), http_task).await {
            Ok(Ok(Err(e))) => error!(error = %e, "HTTP server error during shutdown"),
            Ok(Err(e)) => error!(error = %e, "HTTP server task failed"),
            Err(_) => error!("HTTP server did not stop within 5s"),
            Ok(Ok(Ok(()))) => {}
        }

        info!(exporter = %self.name, "Exporter stopped");
        Ok(())
    }
}

/// Wait for Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Received Ctrl+C, shutting down...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down...");
    }

    Ok(())
}
