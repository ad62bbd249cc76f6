use procwatch::core::config::MonitorConfig;
use procwatch::error::MonitorError;
use tempfile::TempDir;

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = MonitorConfig {
        top_k: 10,
        graceful_timeout_ms: 500,
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(MonitorConfig::load_from(&path).unwrap(), config);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "top_k": 5 }"#).unwrap();

    let config = MonitorConfig::load_from(&path).unwrap();

    assert_eq!(config.top_k, 5);
    assert_eq!(config.history_capacity, 100);
    assert_eq!(config.min_sample_interval_ms, 2000);
}

#[test]
fn test_empty_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "  \n").unwrap();

    assert_eq!(MonitorConfig::load_from(&path).unwrap(), MonitorConfig::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "history_capacity": 0 }"#).unwrap();

    assert!(matches!(
        MonitorConfig::load_from(&path),
        Err(MonitorError::Config(_))
    ));
}

#[test]
fn test_malformed_json_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        MonitorConfig::load_from(&path),
        Err(MonitorError::Json(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    assert!(matches!(
        MonitorConfig::load_from(&path),
        Err(MonitorError::Io(_))
    ));
}
