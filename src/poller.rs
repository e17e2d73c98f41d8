//! Poll Loop
//!
//! Builds the transport and collector once, then runs `gather` on the
//! configured interval for the lifetime of the process. Each cycle is
//! stateless; errors are logged and the next tick starts fresh.

use crate::collector::Collector;
use crate::config::Config;
use crate::intelliflash::HttpTransport;
use crate::measurement::Accumulator;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

pub async fn run(config: Config, sink: Arc<dyn Accumulator>) -> anyhow::Result<()> {
    // Construct-before-fan-out: the shared HTTP client exists before any
    // server task can race on first use.
    let transport = Arc::new(HttpTransport::new(&config.intelliflash)?);
    let collector = Collector::new(
        transport,
        config.intelliflash.servers.clone(),
        config.metrics.clone(),
    );

    let mut ticker = interval(Duration::from_secs(config.metrics.poll_interval_seconds));
    info!(
        "polling {} server(s) every {}s",
        config.intelliflash.servers.len(),
        config.metrics.poll_interval_seconds
    );

    loop {
        ticker.tick().await;
        match collector.gather(sink.clone()).await {
            Ok(report) if report.is_clean() => {}
            Ok(report) => warn!("poll cycle finished with {} error(s)", report.errors.len()),
            Err(e) => return Err(e.into()),
        }
    }
}
