//! Configuration default and shape tests

use intelliflash_exporter::config::{DataMetricsGroup, IntelliflashConfig, MetricsConfig};
use serde_json::json;

#[test]
fn test_metrics_defaults() {
    // Given: An empty metrics section
    let metrics: MetricsConfig = serde_json::from_value(json!({})).unwrap();

    // Then: Sensible poll defaults, no optional collections enabled
    assert_eq!(metrics.poll_interval_seconds, 60);
    assert!(metrics.system_metrics_include.is_empty());
    assert!(metrics.data_metrics.is_empty());
    assert!(metrics.capacity_metrics.is_empty());
    assert!(metrics.prefer_reported_hostname);
}

#[test]
fn test_intelliflash_defaults() {
    // Given: A minimal section with only servers
    let config: IntelliflashConfig = serde_json::from_value(json!({
        "servers": ["10.0.0.5"]
    }))
    .unwrap();

    // Then: Default response timeout and no TLS overrides
    assert_eq!(config.response_timeout_seconds, 5);
    assert!(config.username.is_empty());
    assert!(config.password.is_none());
    assert!(config.tls.ca.is_none());
    assert!(!config.tls.insecure_skip_verify);
}

#[test]
fn test_data_metrics_group_shape() {
    // Given: A filter group with every dimension configured
    let group: DataMetricsGroup = serde_json::from_value(json!({
        "name": "vm-traffic",
        "datasets": ["Pool-A/Project/Dataset"],
        "vms": ["Pool-A/vm-test"],
        "protocols": ["nfs", "smb", "iscsi", "fc"]
    }))
    .unwrap();

    assert_eq!(group.name.as_deref(), Some("vm-traffic"));
    assert_eq!(group.datasets.len(), 1);
    assert_eq!(group.vms.len(), 1);
    assert_eq!(group.protocols.len(), 4);
}
