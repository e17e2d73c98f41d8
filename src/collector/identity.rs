//! Array Identity Lookup
//!
//! Resolves the array's self-reported fully-qualified name for the `array`
//! tag. Callers fall back to the configured address when the lookup fails or
//! the property is absent.

use super::ServerContext;
use crate::error::Result;
use crate::intelliflash::request;
use crate::intelliflash::types::{decode_properties, ARRAY_FQDN_PROPERTY};
use tracing::debug;

pub async fn resolve_array_name(ctx: &ServerContext) -> Result<Option<String>> {
    let request = request::identity_request();
    let body = ctx.transport.execute(&ctx.server, &request).await?;
    let properties = decode_properties(&body, &ctx.server)?;

    let fqdn = properties
        .into_iter()
        .find(|p| p.name == ARRAY_FQDN_PROPERTY && !p.value.is_empty())
        .map(|p| p.value);

    match &fqdn {
        Some(name) => debug!("{} reports identity '{name}'", ctx.server),
        None => debug!("{} did not report an identity, using address", ctx.server),
    }
    Ok(fqdn)
}
