//! Capacity Collector
//!
//! Pool capacity snapshots from the plain `listPools` read. The API does not
//! timestamp these, so records carry the collection wall-clock time.

use super::{epoch_seconds, mapper, CollectionMode, ServerContext};
use crate::error::Result;
use crate::intelliflash::{decode_elements, request};
use tracing::info;

pub async fn collect_capacity(ctx: &ServerContext, array_tag: &str) -> Result<()> {
    let request = request::capacity_request();
    let body = ctx.transport.execute(&ctx.server, &request).await?;
    let mut elements = decode_elements(&body, &ctx.server)?;

    // A group with an empty pool list keeps everything; otherwise keep the
    // union of the pools named across groups.
    let keep_all = ctx.metrics.capacity_metrics.iter().any(|g| g.pools.is_empty());
    if !keep_all {
        elements.retain(|element| {
            element.name.as_deref().is_some_and(|name| {
                ctx.metrics
                    .capacity_metrics
                    .iter()
                    .any(|g| g.pools.iter().any(|p| p == name))
            })
        });
    }

    let records = mapper::map_elements(
        CollectionMode::Capacity,
        &elements,
        array_tag,
        epoch_seconds(),
    );
    let count = records.len();
    for record in records {
        ctx.accumulator.add_record(record);
    }

    info!("collected {count} capacity records from {}", ctx.server);
    Ok(())
}
