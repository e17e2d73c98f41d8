//! IntelliFlash Metrics Collector
//!
//! Polls IntelliFlash storage arrays over their management REST API and
//! reparses the analytics JSON into a uniform measurement model for a
//! metrics pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    HTTPS /zebi/api/v2    ┌───────────────┐
//! │ IntelliFlash │ ◄──────────────────────► │   Collector   │
//! │    array     │   JSON analytics         │               │
//! └──────────────┘                          │  ┌─────────┐  │   records    ┌─────────────┐
//!       ...one per configured server        │  │ Mapper  │  │ ───────────► │ Accumulator │
//! ┌──────────────┐                          │  └─────────┘  │              └─────────────┘
//! │ IntelliFlash │ ◄──────────────────────► │               │
//! └──────────────┘                          └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`intelliflash`] - request building, HTTP transport, response decoding
//! - [`collector`] - poll orchestration and the measurement mapper
//! - [`measurement`] - the record model and the accumulator seam
//! - [`sink`] - InfluxDB line protocol output
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use intelliflash_exporter::{config::Config, poller, sink::LineProtocolSink};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     poller::run(config, Arc::new(LineProtocolSink::stdout())).await?;
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod intelliflash;
pub mod measurement;
pub mod poller;
pub mod sink;
