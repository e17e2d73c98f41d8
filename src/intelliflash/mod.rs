//! IntelliFlash Management API
//!
//! Request construction, HTTP transport, and response decoding for the
//! `/zebi/api/v2` REST interface.

pub mod client;
pub mod request;
pub mod types;

pub use client::{ApiTransport, HttpTransport};
pub use request::{ApiRequest, Category, HttpMethod};
pub use types::{decode_elements, AnalyticsElement};

/// API prefix shared by every operation.
pub const API_URI: &str = "/zebi/api/v2";
