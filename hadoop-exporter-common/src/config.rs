use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{Error, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Upstream daemon endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the daemon. Empty means "use the exporter's default".
    #[serde(default)]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    /// The configured URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Exposition endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (default: "0.0.0.0:9088").
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path for the metrics endpoint (default: "/metrics").
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_listen() -> String {
    "0.0.0.0:9088".to_string()
}

fn default_path() -> String {
    "/metrics".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

impl ServerConfig {
    /// Parse the listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| Error::Config(format!("Invalid listen address: {}", self.listen)))
    }
}

/// Complete exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Value of the `cluster` label attached to every sample.
    #[serde(default)]
    pub cluster: String,

    /// Upstream daemon settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Exposition endpoint settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cluster.trim().is_empty() {
            return Err(Error::Config("cluster label is required".to_string()));
        }

        let url = self.upstream.base_url();
        if url.is_empty() {
            return Err(Error::Config("upstream url is required".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!("upstream url must be http(s): {}", url)));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be > 0".to_string()));
        }

        self.server.listen_addr()?;

        if !self.server.path.starts_with('/') {
            return Err(Error::Config("Metrics path must start with /".to_string()));
        }

        Ok(())
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}
