//! Line Protocol Sink
//!
//! Renders measurement records as InfluxDB line protocol, one line per
//! record, for the stdout-driven deployment mode. Timestamps are emitted in
//! nanoseconds as the protocol expects.

use crate::measurement::{Accumulator, MeasurementRecord};
use std::io::Write;
use std::sync::Mutex;
use tracing::warn;

pub struct LineProtocolSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LineProtocolSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().expect("sink poisoned")
    }
}

impl LineProtocolSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Accumulator for LineProtocolSink<W> {
    fn add_record(&self, record: MeasurementRecord) {
        // Records without renderable fields carry no information in line
        // protocol. NaN and infinity are not representable in the format.
        if !record.fields.values().any(|v| v.is_finite()) {
            return;
        }
        let line = render_line(&record);
        let mut writer = self.writer.lock().expect("sink poisoned");
        if let Err(e) = writeln!(writer, "{line}") {
            warn!("failed to write measurement: {e}");
        }
    }
}

/// `measurement,tag=value field=value timestamp_ns`
pub fn render_line(record: &MeasurementRecord) -> String {
    let mut line = escape(&record.name);
    for (key, value) in &record.tags {
        line.push(',');
        line.push_str(&escape(key));
        line.push('=');
        line.push_str(&escape(value));
    }
    line.push(' ');
    let mut first = true;
    for (key, value) in &record.fields {
        // Non-finite samples have no line protocol representation.
        if !value.is_finite() {
            continue;
        }
        if !first {
            line.push(',');
        }
        first = false;
        line.push_str(&escape(key));
        line.push('=');
        line.push_str(&value.to_string());
    }
    line.push(' ');
    line.push_str(&(record.timestamp * 1_000_000_000).to_string());
    line
}

/// Escape the characters line protocol treats as delimiters.
fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(' ', "\\ ")
        .replace('=', "\\=")
}
