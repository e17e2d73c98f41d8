//! Property-based tests using proptest
//!
//! Tests that verify mapper properties hold for arbitrary inputs.

use intelliflash_exporter::collector::{map_elements, CollectionMode};
use intelliflash_exporter::intelliflash::AnalyticsElement;
use proptest::prelude::*;
use std::collections::HashMap;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,10}"
}

/// POOL_PERFORMANCE element whose datapoint sequences all match the
/// timestamp sequence length, as the array guarantees.
fn pool_performance_element() -> impl Strategy<Value = AnalyticsElement> {
    (1usize..8).prop_flat_map(|samples_len| {
        let timestamps = prop::collection::vec(0i64..2_000_000_000_000, samples_len);
        let path = (segment(), segment(), segment())
            .prop_map(|(pool, disktype, field)| format!("{pool}/{disktype}/{field}"));
        let samples = prop::collection::vec(-1.0e12f64..1.0e12, samples_len);
        let datapoints = prop::collection::hash_map(path, samples, 1..5);
        (timestamps, datapoints).prop_map(|(timestamps, datapoints)| AnalyticsElement {
            system_analytics_type: Some("POOL_PERFORMANCE".to_string()),
            timestamps,
            datapoints,
            ..Default::default()
        })
    })
}

proptest! {
    #[test]
    fn test_record_count_matches_sample_count(element in pool_performance_element()) {
        // Given: An element with equal-length timestamp and sample sequences
        let expected: usize = element.datapoints.values().map(Vec::len).sum();

        // When: Mapping it in system mode
        let records = map_elements(CollectionMode::System, &[element], "array", 0);

        // Then: One record per (path, sample index), one field per record
        prop_assert_eq!(records.len(), expected);
        for record in &records {
            prop_assert_eq!(record.fields.len(), 1);
            prop_assert_eq!(record.tags.len(), 3); // array, pool, disktype
        }
    }

    #[test]
    fn test_timestamps_truncate_to_seconds(element in pool_performance_element()) {
        // Given: Epoch-millisecond timestamps
        let expected: Vec<i64> = element.timestamps.iter().map(|ms| ms / 1000).collect();

        // When: Mapping the element
        let records = map_elements(CollectionMode::System, &[element], "array", 0);

        // Then: Every record timestamp is a whole-second truncation of one
        // of the element's timestamps
        for record in &records {
            prop_assert!(expected.contains(&record.timestamp));
        }
    }

    #[test]
    fn test_arbitrary_category_never_panics(
        category in "\\PC{1,24}",
        path in "\\PC{1,40}",
        sample in any::<f64>(),
    ) {
        // Given: A completely arbitrary category and datapoint path
        let element = AnalyticsElement {
            system_analytics_type: Some(category),
            timestamps: vec![1_565_474_000_000],
            datapoints: HashMap::from([(path, vec![sample])]),
            ..Default::default()
        };

        // When/Then: Mapping must not panic, whatever the shape
        let records = map_elements(CollectionMode::System, &[element], "array", 0);
        for record in &records {
            prop_assert_eq!(record.tags.get("array").map(String::as_str), Some("array"));
        }
    }

    #[test]
    fn test_mapping_twice_is_identical(element in pool_performance_element()) {
        // Given: The same element mapped twice
        let first = map_elements(CollectionMode::System, std::slice::from_ref(&element), "array", 0);
        let second = map_elements(CollectionMode::System, &[element], "array", 0);

        // Then: The record multisets are equal
        prop_assert_eq!(first.len(), second.len());
        let mut remaining = second;
        for record in &first {
            let pos = remaining.iter().position(|r| r == record);
            prop_assert!(pos.is_some());
            remaining.remove(pos.unwrap());
        }
    }
}
