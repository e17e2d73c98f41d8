//! IntelliFlash API Type Definitions
//!
//! Rust struct definitions for the analytics JSON envelope returned by the
//! array. The schema is ad-hoc: system analytics, data analytics, and pool
//! listings all come back as an array of objects whose relevant fields vary
//! by endpoint, so one element type covers all three with optional fields.
//!
//! # Design Notes
//!
//! - **Unknown fields**: ignored, never an error. Arrays add fields across
//!   firmware revisions and collection must keep working.
//! - **Serde Defaults**: `#[serde(default)]` is used extensively because
//!   each endpoint populates only a subset of the element.

use crate::error::{CollectorError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// One object from an analytics response.
///
/// Invariant (guaranteed by the array, relied on by the mapper): every
/// datapoint sample sequence has the same length as `timestamps`, and index
/// `i` of any sample sequence belongs to `timestamps[i]`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsElement {
    /// Sub-category tag for system analytics (CPU, NETWORK, CACHE_HITS,
    /// POOL_PERFORMANCE) or the free-form entity type for data analytics.
    #[serde(default, alias = "dataAnalyticsType")]
    pub system_analytics_type: Option<String>,
    /// Entity name in data-analytics mode, pool name in capacity mode.
    #[serde(default)]
    pub name: Option<String>,
    /// Epoch milliseconds, one per sample index.
    #[serde(default)]
    pub timestamps: Vec<i64>,
    /// Slash-delimited datapoint path to ordered samples.
    #[serde(default)]
    pub datapoints: HashMap<String, Vec<f64>>,
    /// Per-path one-minute averages. Decoded for completeness, not mapped.
    #[serde(default)]
    pub averages: HashMap<String, f64>,
    /// Capacity listing only.
    #[serde(default)]
    pub available_size: Option<f64>,
    #[serde(default)]
    pub total_size: Option<f64>,
}

/// System property from `listSystemProperties`, used for the identity lookup.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SystemProperty {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Property holding the array's fully-qualified name.
pub const ARRAY_FQDN_PROPERTY: &str = "ARRAY_FQDN";

/// Vendor exception envelope returned in some error bodies.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiException {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub extended_data: Option<ExceptionData>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExceptionData {
    #[serde(default, rename = "EX_CAUSE_MESSAGE")]
    pub cause_message: Option<String>,
}

impl ApiException {
    /// Best human-readable text the envelope carries.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.details.as_deref())
            .or_else(|| {
                self.extended_data
                    .as_ref()
                    .and_then(|d| d.cause_message.as_deref())
            })
    }
}

/// Decode a whole response body into analytics elements.
///
/// Fully eager: the body is already buffered by the transport, there is no
/// streaming mode. Anything that is not a JSON array of objects fails with
/// `MalformedResponse`.
pub fn decode_elements(body: &[u8], server: &str) -> Result<Vec<AnalyticsElement>> {
    serde_json::from_slice(body).map_err(|source| CollectorError::MalformedResponse {
        server: server.to_string(),
        source,
    })
}

/// Decode a `listSystemProperties` response.
pub fn decode_properties(body: &[u8], server: &str) -> Result<Vec<SystemProperty>> {
    serde_json::from_slice(body).map_err(|source| CollectorError::MalformedResponse {
        server: server.to_string(),
        source,
    })
}
