//! Tests for config file discovery and loading

use sling_config::{CONFIG_FILE_NAME, ConfigDiscovery, ConfigError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) {
    fs::write(dir.path().join(CONFIG_FILE_NAME), content).unwrap();
}

#[test]
fn loads_full_config() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{
  "entry": "./src/main.js",
  "output": { "path": "build", "filename": "app.js" },
  "moduleRules": [
    { "test": "\\.txt$", "use": ["raw-loader"] },
    { "test": "\\.css$", "use": ["style-loader", "raw-loader"] }
  ],
  "plugins": ["progress", "timing"]
}"#,
    );

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.entry, "./src/main.js");
    assert_eq!(config.output.path, PathBuf::from("build"));
    assert_eq!(config.output.filename, "app.js");
    assert_eq!(config.module_rules.len(), 2);
    assert_eq!(config.module_rules[1].loaders, vec!["style-loader", "raw-loader"]);
    assert_eq!(config.plugins, vec!["progress", "timing"]);
}

#[test]
fn partial_output_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{ "output": { "filename": "main.js" } }"#);

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.entry, "./src/index.js");
    assert_eq!(config.output.path, PathBuf::from("dist"));
    assert_eq!(config.output.filename, "main.js");
}

#[test]
fn malformed_json_is_invalid_value() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{ "entry": "./src/index.js", "#);

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn wrong_field_type_is_invalid_value() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{ "moduleRules": { "test": "x" } }"#);

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn loading_runs_validation() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{ "moduleRules": [{ "test": "[", "use": ["raw-loader"] }] }"#,
    );

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(err.to_string().contains("moduleRules[0].test"));
}
