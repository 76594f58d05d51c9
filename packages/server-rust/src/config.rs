//! Command-line and environment configuration for the server binary.

use std::time::Duration;

use clap::Parser;

use crate::network::NetworkConfig;
use crate::storage::{EngineKind, StorageConfig};

/// Output format for log lines.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "roster-server",
    about = "In-memory employee record service",
    version
)]
pub struct Cli {
    #[arg(long, env = "ROSTER_HOST", value_name = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "ROSTER_PORT", value_name = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Allowed CORS origins; `*` allows any.
    #[arg(
        long = "cors-origin",
        env = "ROSTER_CORS_ORIGINS",
        value_name = "ORIGIN",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,

    #[arg(
        long = "request-timeout-secs",
        env = "ROSTER_REQUEST_TIMEOUT_SECS",
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,

    #[arg(
        long = "drain-timeout-secs",
        env = "ROSTER_DRAIN_TIMEOUT_SECS",
        value_name = "SECS",
        default_value_t = 30
    )]
    pub drain_timeout_secs: u64,

    /// Storage engine backing the record store (`dashmap` or `locked`).
    #[arg(long, env = "ROSTER_ENGINE", value_name = "ENGINE", default_value = "dashmap")]
    pub engine: EngineKind,

    /// Start with an empty store instead of the five sample records.
    #[arg(long, env = "ROSTER_NO_SEED")]
    pub no_seed: bool,

    #[arg(long, env = "ROSTER_LOG_LEVEL", value_name = "FILTER", default_value = "info")]
    pub log_level: String,

    #[arg(
        long,
        env = "ROSTER_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
}

impl Cli {
    #[must_use]
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            drain_timeout: Duration::from_secs(self.drain_timeout_secs),
        }
    }

    #[must_use]
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            engine: self.engine,
            seed: !self.no_seed,
        }
    }
}
