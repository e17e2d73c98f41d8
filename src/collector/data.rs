//! Data Analytics Collector
//!
//! One sub-request per configured filter group. Earlier builds collapsed the
//! groups into whichever came last; here each group is dispatched as its own
//! request and failures are attributed per group without stopping the rest.

use super::{epoch_seconds, mapper, CollectionMode, ServerContext};
use crate::error::CollectorError;
use crate::intelliflash::{decode_elements, request};
use tracing::info;

pub async fn collect_data_analytics(ctx: &ServerContext, array_tag: &str) -> Vec<CollectorError> {
    let mut errors = Vec::new();
    let requests = request::data_analytics_requests(&ctx.metrics.data_metrics);

    for (group, request) in ctx.metrics.data_metrics.iter().zip(&requests) {
        let group_label = group.name.as_deref().unwrap_or("unnamed");

        let body = match ctx.transport.execute(&ctx.server, request).await {
            Ok(body) => body,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        let elements = match decode_elements(&body, &ctx.server) {
            Ok(elements) => elements,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        let records = mapper::map_elements(
            CollectionMode::Data,
            &elements,
            array_tag,
            epoch_seconds(),
        );
        let count = records.len();
        for record in records {
            ctx.accumulator.add_record(record);
        }
        info!(
            "collected {count} data analytics records from {} (group '{group_label}')",
            ctx.server
        );
    }

    errors
}
