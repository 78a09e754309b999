//! CLI argument parsing for exporters.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};
use hadoop_exporter_common::{ExporterConfig, Result, load_config};

/// Common CLI arguments for all exporters.
///
/// Every flag overrides the matching configuration file entry.
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Hadoop Prometheus exporter")]
pub struct ExporterArgs {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Upstream daemon URL.
    #[arg(short, long, aliases = ["namenode.jmx.url", "resourcemanager.url"])]
    pub url: Option<String>,

    /// Value of the `cluster` label.
    #[arg(long)]
    pub cluster: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "VIRTUAL_PORT")]
    pub port: Option<u16>,

    /// Path under which to expose metrics.
    #[arg(long)]
    pub telemetry_path: Option<String>,

    /// Upstream request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ExporterArgs {
    /// Parse CLI arguments under the given binary name and description.
    ///
    /// The single-dash `-url <url>` spelling is accepted as `--url`.
    pub fn parse_for(name: &'static str, about: &'static str) -> Self {
        let matches = <Self as CommandFactory>::command()
            .name(name)
            .about(about)
            .get_matches_from(normalize_legacy_flags(std::env::args_os()));

        match <Self as FromArgMatches>::from_arg_matches(&matches) {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Build the effective configuration.
    ///
    /// Loads the configuration file if one was given, applies the CLI
    /// overrides, falls back to `default_url` for the upstream and validates
    /// the result.
    pub fn into_config(self, default_url: &str) -> Result<ExporterConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ExporterConfig::default(),
        };

        if let Some(url) = self.url {
            config.upstream.url = url;
        }
        if config.upstream.url.is_empty() {
            config.upstream.url = default_url.to_string();
        }
        config.upstream.url = config.upstream.base_url().to_string();

        if let Some(cluster) = self.cluster {
            config.cluster = cluster;
        }
        if let Some(timeout) = self.timeout_secs {
            config.upstream.timeout_secs = timeout;
        }
        if let Some(port) = self.port {
            let mut addr = config.server.listen_addr()?;
            addr.set_port(port);
            config.server.listen = addr.to_string();
        }
        if let Some(path) = self.telemetry_path {
            config.server.path = path;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Rewrite `-url` and `-url=<url>` to their `--url` form; `-u` stays short.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if s == "-url" || s.starts_with("-url=") => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}
