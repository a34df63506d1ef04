use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.resource_name, DEFAULT_RESOURCE_NAME);
    assert_eq!(config.post_timeout_ms, DEFAULT_POST_TIMEOUT_MS);
    assert_eq!(config.post_queue_capacity, DEFAULT_POST_QUEUE_CAPACITY);
    assert_eq!(config.max_pending_opens, DEFAULT_MAX_PENDING_OPENS);
    assert_eq!(config.search_placeholder, DEFAULT_SEARCH_PLACEHOLDER);
    assert_eq!(config.busy_policy, BusyPolicy::Queue);
    assert!(!config.allow_item_markup);
    assert!(config.callback_base.is_none());
}

#[test]
fn test_callback_url_from_resource_name() {
    let config = Config {
        resource_name: "qb-menu".to_string(),
        ..Config::default()
    };
    assert_eq!(config.callback_url("clickedButton"), "https://qb-menu/clickedButton");
}

#[test]
fn test_callback_base_override_trims_slash() {
    let config = Config {
        callback_base: Some("http://127.0.0.1:3000/".to_string()),
        ..Config::default()
    };
    assert_eq!(config.callback_url("closeMenu"), "http://127.0.0.1:3000/closeMenu");
}

#[test]
fn test_partial_json_uses_defaults() {
    let config: Config =
        serde_json::from_str(r#"{"resourceName":"menus","busyPolicy":"reject"}"#).unwrap();
    assert_eq!(config.resource_name, "menus");
    assert_eq!(config.busy_policy, BusyPolicy::Reject);
    assert_eq!(config.post_timeout_ms, DEFAULT_POST_TIMEOUT_MS);
    assert_eq!(config.search_placeholder, DEFAULT_SEARCH_PLACEHOLDER);
}

#[test]
fn test_serialization_skips_unset_options() {
    let json = serde_json::to_value(Config::default()).unwrap();
    assert!(json.get("callbackBase").is_none());
    assert!(json.get("logDir").is_none());
    assert_eq!(json["busyPolicy"], "queue");
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.json"));
    assert_eq!(config.resource_name, DEFAULT_RESOURCE_NAME);
}

#[test]
fn test_load_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{"resourceName":"garage","postTimeoutMs":750,"allowItemMarkup":true}}"#
    )
    .unwrap();

    let config = load_config_from(&path);
    assert_eq!(config.resource_name, "garage");
    assert_eq!(config.post_timeout_ms, 750);
    assert!(config.allow_item_markup);
}

#[test]
fn test_load_invalid_json_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = load_config_from(&path);
    assert_eq!(config.resource_name, DEFAULT_RESOURCE_NAME);
}

#[test]
fn test_load_empty_resource_name_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"resourceName":"  ","postTimeoutMs":10}"#).unwrap();

    let config = load_config_from(&path);
    assert_eq!(config.resource_name, DEFAULT_RESOURCE_NAME);
    assert_eq!(config.post_timeout_ms, DEFAULT_POST_TIMEOUT_MS);
}
