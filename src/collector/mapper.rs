//! Measurement Mapper
//!
//! The core transformation: walks decoded analytics elements and produces
//! one record per (element, datapoint-path, timestamp-index) triple. Tag and
//! field names are derived positionally from the slash-delimited datapoint
//! path, with the rule selected by the element's sub-category or entity
//! type.
//!
//! Unrecognized sub-categories and entity types are mapped permissively: the
//! record still carries the `array` tag and measurement name so that new
//! array-reported categories never hard-fail collection, they just come out
//! without category-specific tags or fields.

use crate::intelliflash::types::AnalyticsElement;
use crate::measurement::MeasurementRecord;
use tracing::debug;

/// Which endpoint family produced the elements being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionMode {
    /// `getOneMinuteSystemAnalyticsHistory`: rule keyed by sub-category.
    System,
    /// `getOneMinuteDataAnalyticsHistory`: rule keyed by entity type.
    Data,
    /// `listPools`: fixed capacity rule, wall-clock timestamp.
    Capacity,
}

/// Measurement name for capacity snapshots, which have no analytics type.
pub const CAPACITY_MEASUREMENT: &str = "CAPACITY";

/// Map a decoded response to measurement records.
///
/// `array` is the value of the `array` tag attached to every record (the
/// self-reported FQDN or the configured address). `collected_at` is the
/// wall-clock epoch-second timestamp used for capacity snapshots, which the
/// API does not timestamp itself.
pub fn map_elements(
    mode: CollectionMode,
    elements: &[AnalyticsElement],
    array: &str,
    collected_at: i64,
) -> Vec<MeasurementRecord> {
    let mut records = Vec::new();
    for element in elements {
        match mode {
            CollectionMode::System => map_datapoints(element, array, &mut records, |record, segments, sample| {
                apply_system_rule(element_type(element), record, segments, sample)
            }),
            CollectionMode::Data => map_datapoints(element, array, &mut records, |record, segments, sample| {
                apply_data_rule(element, record, segments, sample)
            }),
            CollectionMode::Capacity => {
                records.push(map_capacity(element, array, collected_at));
            }
        }
    }
    records
}

fn element_type(element: &AnalyticsElement) -> &str {
    element.system_analytics_type.as_deref().unwrap_or_default()
}

/// Shared (path, sample-index) walk. The rule closure finishes one record or
/// returns `None` when the path has too few segments for its shape, in which
/// case the datapoint is dropped as an upstream-data defect.
fn map_datapoints<F>(
    element: &AnalyticsElement,
    array: &str,
    records: &mut Vec<MeasurementRecord>,
    rule: F,
) where
    F: Fn(MeasurementRecord, &[&str], f64) -> Option<MeasurementRecord>,
{
    for (path, samples) in &element.datapoints {
        let segments: Vec<&str> = path.split('/').collect();
        for (index, &sample) in samples.iter().enumerate() {
            let Some(&millis) = element.timestamps.get(index) else {
                debug!("datapoint '{path}' sample {index} has no matching timestamp");
                continue;
            };
            let record = MeasurementRecord::new(element_type(element), millis / 1000)
                .tag("array", array);
            match rule(record, &segments, sample) {
                Some(record) => records.push(record),
                None => debug!("datapoint path '{path}' too short for its category rule"),
            }
        }
    }
}

/// Category-specific derivation for system analytics.
fn apply_system_rule(
    category: &str,
    record: MeasurementRecord,
    segments: &[&str],
    sample: f64,
) -> Option<MeasurementRecord> {
    match (category, segments) {
        ("POOL_PERFORMANCE", [pool, disktype, field, ..]) => Some(
            record
                .tag("pool", *pool)
                .tag("disktype", *disktype)
                .field(*field, sample),
        ),
        ("POOL_PERFORMANCE", _) => None,
        ("NETWORK", [controller, rest @ ..]) => {
            let record = record.tag("controller", *controller);
            match rest {
                // Interface[Group] metrics
                [marker, interface, field, ..] if marker.starts_with('I') => {
                    Some(record.tag("interface", *interface).field(*field, sample))
                }
                // Controller totals
                [first, second, ..] => {
                    Some(record.field(format!("{first}_{second}"), sample))
                }
                _ => None,
            }
        }
        ("NETWORK", _) => None,
        ("CPU" | "CACHE_HITS", [controller, field, ..]) => {
            Some(record.tag("controller", *controller).field(*field, sample))
        }
        ("CPU" | "CACHE_HITS", _) => None,
        // New array-reported category: keep the record, base tag only.
        _ => Some(record),
    }
}

/// Data analytics: the entity type doubles as measurement name and tag key,
/// the entity name is the tag value, and the field is the path head.
fn apply_data_rule(
    element: &AnalyticsElement,
    record: MeasurementRecord,
    segments: &[&str],
    sample: f64,
) -> Option<MeasurementRecord> {
    let entity_type = element_type(element);
    let entity_name = element.name.as_deref().unwrap_or_default();
    if entity_type.is_empty() || entity_name.is_empty() {
        // Untyped element, emitted with the base tag only.
        return Some(record);
    }
    let field = segments.first()?;
    Some(
        record
            .tag(entity_type.to_lowercase(), entity_name)
            .field(*field, sample),
    )
}

/// Capacity snapshots carry their values on the element itself rather than
/// in the datapoint map, and have no API-side timestamp.
fn map_capacity(element: &AnalyticsElement, array: &str, collected_at: i64) -> MeasurementRecord {
    let mut record = MeasurementRecord::new(CAPACITY_MEASUREMENT, collected_at).tag("array", array);
    if let Some(pool) = element.name.as_deref() {
        record = record.tag("pool", pool);
    }
    if let Some(available) = element.available_size {
        record = record.field("available_size", available);
    }
    if let Some(total) = element.total_size {
        record = record.field("total_size", total);
    }
    record
}
