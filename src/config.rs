use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub intelliflash: IntelliflashConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IntelliflashConfig {
    /// Array management addresses. Userinfo embedded in an address
    /// (`user:pass@host`) is honoured when no explicit credentials are set.
    #[serde(default)]
    pub servers: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: Option<SecretString>,
    #[serde(default = "default_response_timeout")]
    pub response_timeout_seconds: u64,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TlsConfig {
    /// Path to a PEM CA bundle for the array's certificate chain.
    #[serde(default)]
    pub ca: Option<String>,
    /// Paths to a PEM client certificate and PKCS#8 key.
    #[serde(default)]
    pub cert: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// System sub-categories to request. Empty means all four known ones.
    #[serde(default)]
    pub system_metrics_include: Vec<String>,
    /// Each group is one independent data-analytics sub-request.
    #[serde(default)]
    pub data_metrics: Vec<DataMetricsGroup>,
    /// Pool capacity snapshots are collected only when at least one group
    /// is configured.
    #[serde(default)]
    pub capacity_metrics: Vec<CapacityGroup>,
    /// Tag records with the array's self-reported FQDN instead of the
    /// configured address, when the identity lookup succeeds.
    #[serde(default = "default_true")]
    pub prefer_reported_hostname: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataMetricsGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub datasets: Vec<String>,
    #[serde(default)]
    pub vms: Vec<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CapacityGroup {
    #[serde(default)]
    pub name: Option<String>,
    /// Pool names to keep. Empty keeps every pool the array reports.
    #[serde(default)]
    pub pools: Vec<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            system_metrics_include: Vec::new(),
            data_metrics: Vec::new(),
            capacity_metrics: Vec::new(),
            prefer_reported_hostname: default_true(),
        }
    }
}

fn default_response_timeout() -> u64 {
    5
}

fn default_poll_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("INTELLIFLASH_EXPORTER").separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
