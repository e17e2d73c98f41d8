//! Poll Orchestrator and Per-Category Collectors
//!
//! One `gather` call is one poll cycle: fan out a task per configured
//! server, run the sub-collections sequentially inside each task, join
//! everything, and report the collected errors. A failed sub-collection is
//! simply absent from the cycle's output; nothing is retried and no failure
//! aborts sibling work.
//!
//! # Error Handling
//!
//! The only early-fatal path is an empty server list, checked before any
//! task is spawned. Every other failure is pushed into the [`GatherReport`]
//! attributed to its originating server and sub-operation.

use crate::config::MetricsConfig;
use crate::error::{CollectorError, Result};
use crate::intelliflash::ApiTransport;
use crate::measurement::Accumulator;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::JoinSet;
use tracing::{info, warn};

pub mod capacity;
pub mod data;
pub mod identity;
pub mod mapper;
pub mod system;

pub use mapper::{map_elements, CollectionMode};

/// Everything one server task needs, owned so tasks are `'static`.
#[derive(Clone)]
pub struct ServerContext {
    pub server: String,
    pub transport: Arc<dyn ApiTransport>,
    pub metrics: Arc<MetricsConfig>,
    pub accumulator: Arc<dyn Accumulator>,
}

/// Outcome of one poll cycle: zero or more attributed errors. Records have
/// already been delivered to the accumulator by the time this is returned.
#[derive(Debug, Default)]
pub struct GatherReport {
    pub errors: Vec<CollectorError>,
}

impl GatherReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Fan-out/fan-in poll orchestrator.
pub struct Collector {
    transport: Arc<dyn ApiTransport>,
    servers: Vec<String>,
    metrics: Arc<MetricsConfig>,
}

impl Collector {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        servers: Vec<String>,
        metrics: MetricsConfig,
    ) -> Self {
        Self {
            transport,
            servers,
            metrics: Arc::new(metrics),
        }
    }

    /// Run one poll cycle against every configured server.
    ///
    /// Blocks until every server task has completed; no partial results are
    /// delivered early. Fails synchronously with `NoServersConfigured` when
    /// the server list is empty, before any network activity.
    pub async fn gather(&self, accumulator: Arc<dyn Accumulator>) -> Result<GatherReport> {
        if self.servers.is_empty() {
            return Err(CollectorError::NoServersConfigured);
        }

        let mut tasks = JoinSet::new();
        for server in &self.servers {
            let ctx = ServerContext {
                server: server.clone(),
                transport: self.transport.clone(),
                metrics: self.metrics.clone(),
                accumulator: accumulator.clone(),
            };
            tasks.spawn(collect_server(ctx));
        }

        let mut report = GatherReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(errors) => report.errors.extend(errors),
                Err(e) => report
                    .errors
                    .push(CollectorError::Config(format!("server task failed: {e}"))),
            }
        }

        for error in &report.errors {
            warn!("{error}");
        }
        Ok(report)
    }
}

/// One server's share of a poll cycle. The sub-steps run sequentially, so a
/// server sees at most one in-flight request at a time, and each step's
/// failure is captured without stopping the ones after it.
async fn collect_server(ctx: ServerContext) -> Vec<CollectorError> {
    let mut errors = Vec::new();

    let array_tag = if ctx.metrics.prefer_reported_hostname {
        match identity::resolve_array_name(&ctx).await {
            Ok(Some(fqdn)) => fqdn,
            Ok(None) => ctx.server.clone(),
            Err(e) => {
                errors.push(e);
                ctx.server.clone()
            }
        }
    } else {
        ctx.server.clone()
    };

    if let Err(e) = system::collect_system_analytics(&ctx, &array_tag).await {
        errors.push(e);
    }

    if !ctx.metrics.data_metrics.is_empty() {
        errors.extend(data::collect_data_analytics(&ctx, &array_tag).await);
    }

    if !ctx.metrics.capacity_metrics.is_empty() {
        if let Err(e) = capacity::collect_capacity(&ctx, &array_tag).await {
            errors.push(e);
        }
    }

    info!(
        "finished poll of {} ({} error(s))",
        ctx.server,
        errors.len()
    );
    errors
}

/// Wall-clock epoch seconds, used to stamp capacity snapshots.
pub(crate) fn epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
