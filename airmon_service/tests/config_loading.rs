/// Integration tests for configuration-driven evaluation
///
/// Tests verify:
/// 1. A config file on disk produces the expected threshold table
/// 2. Invalid boundary overrides stop the evaluator from being built
///
/// Run with: cargo test --test config_loading

use std::io::Write;

use airmon_service::alert::{AdvisoryKey, RuleEvaluator};
use airmon_service::config::{load_config, load_service_config};
use airmon_service::ingest::parse_snapshot_json;
use airmon_service::model::{Channel, ConfigError};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp config file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_override_from_file_changes_advisories() {
    let file = write_config(
        r#"
[logging]
level = "debug"

[thresholds.so2]
moderate = 20
unhealthy_sensitive = 40
unhealthy = 100
very_unhealthy = 200
hazardous = 400
"#,
    );
    let config = load_config(file.path()).expect("config should load");
    let table = config.threshold_table().expect("override is ascending");
    assert_eq!(table.sensitive_level(Channel::So2), 40.0);

    let snapshot = parse_snapshot_json(r#"{"aqi": {"details": {"so2": 50}}}"#).expect("snapshot");
    let custom = RuleEvaluator::new(table).evaluate(&snapshot);
    let standard = RuleEvaluator::default().evaluate(&snapshot);
    assert!(custom.is_active(AdvisoryKey::So2High), "50 exceeds the overridden boundary of 40");
    assert!(!standard.is_active(AdvisoryKey::So2High), "50 is below the built-in boundary of 76");
}

#[test]
fn test_invalid_override_prevents_evaluator_construction() {
    let file = write_config(
        r#"
[thresholds.pm10]
moderate = 55
unhealthy_sensitive = 155
unhealthy = 155
very_unhealthy = 355
hazardous = 425
"#,
    );
    let config = load_service_config(Some(file.path())).expect("shape is valid");
    match config.threshold_table() {
        Err(ConfigError::NonAscending { channel, .. }) => assert_eq!(channel, Channel::Pm10),
        other => panic!("expected a non-ascending error for pm10, got {:?}", other),
    }
}

#[test]
fn test_malformed_toml_is_reported() {
    let file = write_config("[logging\nlevel = ");
    let result = load_config(file.path());
    assert!(matches!(result, Err(ConfigError::Parse(_))), "got {:?}", result);
}
