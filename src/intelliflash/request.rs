//! Request Builder
//!
//! Builds the JSON body and target operation for each of the three endpoint
//! families. The array's query endpoints take positional array-of-arrays
//! bodies rather than keyed objects, and treat `null` as "match all" where
//! an empty array would mean "match none".

use crate::config::DataMetricsGroup;
use crate::error::CollectorError;
use serde_json::{json, Value};
use std::str::FromStr;

/// The four built-in system performance domains.
pub const SYSTEM_SUB_CATEGORIES: [&str; 4] =
    ["NETWORK", "POOL_PERFORMANCE", "CPU", "CACHE_HITS"];

/// Endpoint family for one sub-request.
///
/// The collectors dispatch on this internally via the builder functions
/// below; the enum and its `FromStr` are the public surface for consumers
/// that carry categories as configuration strings, which is why anything
/// outside the three recognized values fails with `UnknownCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    System,
    Data,
    Capacity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "SYSTEM",
            Category::Data => "DATA",
            Category::Capacity => "CAPACITY",
        }
    }
}

impl FromStr for Category {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SYSTEM" => Ok(Category::System),
            "DATA" => Ok(Category::Data),
            "CAPACITY" => Ok(Category::Capacity),
            other => Err(CollectorError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One fully-formed sub-request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub operation: &'static str,
    pub method: HttpMethod,
    pub body: Value,
}

/// System-analytics history: exactly one request regardless of how many
/// sub-categories are included. An empty include-list means all four.
pub fn system_analytics_request(include: &[String]) -> ApiRequest {
    let subcats: Vec<&str> = if include.is_empty() {
        SYSTEM_SUB_CATEGORIES.to_vec()
    } else {
        include.iter().map(String::as_str).collect()
    };
    ApiRequest {
        operation: "getOneMinuteSystemAnalyticsHistory",
        method: HttpMethod::Post,
        body: json!([subcats]),
    }
}

/// Data-analytics history: one independent request per configured filter
/// group. Empty filter dimensions become `null` so the array matches all
/// instead of none; protocol names are upper-cased to the API's convention.
pub fn data_analytics_requests(groups: &[DataMetricsGroup]) -> Vec<ApiRequest> {
    groups
        .iter()
        .map(|group| {
            let protocols: Vec<String> =
                group.protocols.iter().map(|p| p.to_uppercase()).collect();
            ApiRequest {
                operation: "getOneMinuteDataAnalyticsHistory",
                method: HttpMethod::Post,
                body: json!([
                    null_if_empty(&group.datasets),
                    null_if_empty(&group.vms),
                    null_if_empty(&protocols),
                ]),
            }
        })
        .collect()
}

/// Pool listing for capacity snapshots: a plain read, fixed empty payload.
pub fn capacity_request() -> ApiRequest {
    ApiRequest {
        operation: "listPools",
        method: HttpMethod::Get,
        body: json!([]),
    }
}

/// Identity lookup for the `array` tag.
pub fn identity_request() -> ApiRequest {
    ApiRequest {
        operation: "listSystemProperties",
        method: HttpMethod::Post,
        body: json!([[super::types::ARRAY_FQDN_PROPERTY]]),
    }
}

fn null_if_empty(values: &[String]) -> Value {
    if values.is_empty() {
        Value::Null
    } else {
        json!(values)
    }
}
