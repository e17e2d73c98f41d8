//! System Analytics Collector
//!
//! One request per cycle covering the included sub-categories (CPU, NETWORK,
//! CACHE_HITS, POOL_PERFORMANCE), mapped with the per-sub-category rules.

use super::{epoch_seconds, mapper, CollectionMode, ServerContext};
use crate::error::Result;
use crate::intelliflash::{decode_elements, request};
use tracing::info;

pub async fn collect_system_analytics(ctx: &ServerContext, array_tag: &str) -> Result<()> {
    let request = request::system_analytics_request(&ctx.metrics.system_metrics_include);
    let body = ctx.transport.execute(&ctx.server, &request).await?;
    let elements = decode_elements(&body, &ctx.server)?;

    let records = mapper::map_elements(
        CollectionMode::System,
        &elements,
        array_tag,
        epoch_seconds(),
    );
    let count = records.len();
    for record in records {
        ctx.accumulator.add_record(record);
    }

    info!("collected {count} system analytics records from {}", ctx.server);
    Ok(())
}
