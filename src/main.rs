use anyhow::Result;
use clap::Parser;
use intelliflash_exporter::{config::Config, poller, sink::LineProtocolSink};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Array address (overrides config, repeatable)
    #[arg(long = "server", env = "INTELLIFLASH_SERVERS", value_delimiter = ',')]
    servers: Vec<String>,

    /// API username (overrides config)
    #[arg(long, env = "INTELLIFLASH_USERNAME")]
    username: Option<String>,

    /// API password (overrides config)
    #[arg(long, env = "INTELLIFLASH_PASSWORD")]
    password: Option<String>,

    /// Poll interval in seconds
    #[arg(short, long, env = "INTELLIFLASH_INTERVAL")]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting IntelliFlash exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if !args.servers.is_empty() {
        config.intelliflash.servers = args.servers;
    }
    if let Some(username) = args.username {
        config.intelliflash.username = username;
    }
    if let Some(password) = args.password {
        config.intelliflash.password = Some(secrecy::SecretString::new(password.into()));
    }
    if let Some(interval) = args.interval {
        config.metrics.poll_interval_seconds = interval;
    }

    info!("Configuration loaded successfully");
    info!("Arrays: {}", config.intelliflash.servers.join(", "));

    // Measurements go to stdout as line protocol, logs stay on stderr.
    if let Err(e) = poller::run(config, Arc::new(LineProtocolSink::stdout())).await {
        error!("Collector error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
