//! Measurement Model
//!
//! Records produced by the mapper are plain (name, tags, fields, timestamp)
//! tuples. The downstream pipeline is abstracted behind the [`Accumulator`]
//! trait so the collector never depends on a particular sink.

use std::collections::BTreeMap;
use std::sync::Mutex;

/// One emitted measurement.
///
/// Tag and field maps are ordered so that two records built from the same
/// input compare equal regardless of insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Measurement name: sub-category tag, entity-type string, or `CAPACITY`.
    pub name: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, f64>,
    /// Epoch seconds.
    pub timestamp: i64,
}

impl MeasurementRecord {
    pub fn new(name: impl Into<String>, timestamp: i64) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// Output sink for collected measurements.
///
/// Implementations must tolerate concurrent calls; every server task appends
/// to the same accumulator during a poll cycle.
pub trait Accumulator: Send + Sync {
    fn add_record(&self, record: MeasurementRecord);
}

/// In-memory accumulator, used by tests and fixtures.
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
    records: Mutex<Vec<MeasurementRecord>>,
}

impl MemoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MeasurementRecord> {
        self.records.lock().expect("accumulator poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("accumulator poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Accumulator for MemoryAccumulator {
    fn add_record(&self, record: MeasurementRecord) {
        self.records.lock().expect("accumulator poisoned").push(record);
    }
}
