//! Integration tests for site configuration loading and env overrides

use palbook::config::{ENV_DATA_DIR, ENV_PORT};
use palbook::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn demo_config_path() -> String {
    format!("{}/demos/site/site.yaml", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test_demo_config_loads() {
    let config = SiteConfig::from_yaml_file(&demo_config_path()).unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.data.dir, PathBuf::from("data"));
    assert_eq!(config.debounce_window(), Duration::from_millis(100));
    assert!(config.log.filter.contains("palbook=debug"));
}

#[test]
fn test_partial_yaml_keeps_other_defaults() {
    let config = SiteConfig::from_yaml_str("search:\n  debounce_ms: 250\n").unwrap();

    assert_eq!(config.search.debounce_ms, 250);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.bind_addr().unwrap().port(), 3000);
}

#[test]
fn test_env_overrides_yaml() {
    let env: HashMap<&str, &str> = [(ENV_PORT, "8080"), (ENV_DATA_DIR, "/srv/palbook")]
        .into_iter()
        .collect();

    let config = SiteConfig::from_yaml_file(&demo_config_path())
        .unwrap()
        .merge_env_from(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.data.dir, PathBuf::from("/srv/palbook"));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let err = SiteConfig::from_yaml_str("server:\n  port: 70000\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = SiteConfig::from_yaml_str("search:\n  debounce_ms: 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SiteConfig::from_yaml_file("/nonexistent/site.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
