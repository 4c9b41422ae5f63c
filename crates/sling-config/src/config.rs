//! File-level configuration model.
//!
//! This is the serde view of `sling.config.json`. The bundler consumes it
//! after it has been validated; loader names and plugin names stay plain
//! strings here and are resolved by the bundler's registries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const DEFAULT_ENTRY: &str = "./src/index.js";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const DEFAULT_OUTPUT_FILENAME: &str = "bundle.js";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SlingConfig {
    /// Entry module, relative to the project root
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Where the bundle is written
    #[serde(default)]
    pub output: OutputOptions,

    /// Ordered loader rules; the first rule whose `test` matches a file wins
    #[serde(default)]
    pub module_rules: Vec<RuleOptions>,

    /// Built-in plugin names, applied in order
    #[serde(default)]
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
    /// Output directory, relative to the project root
    #[serde(default = "default_output_dir")]
    pub path: PathBuf,

    /// Bundle file name inside `path`
    #[serde(default = "default_output_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOptions {
    /// Regular expression tested against the module's file path
    pub test: String,

    /// Loader names, declared left-to-right and applied right-to-left
    #[serde(rename = "use")]
    pub loaders: Vec<String>,
}

impl Default for SlingConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            output: OutputOptions::default(),
            module_rules: Vec::new(),
            plugins: Vec::new(),
        }
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: default_output_dir(),
            filename: default_output_filename(),
        }
    }
}

impl SlingConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use sling_config::SlingConfig;
    /// use serde_json::json;
    ///
    /// let config = SlingConfig::from_value(json!({
    ///     "entry": "./src/main.js",
    ///     "moduleRules": [{ "test": "\\.txt$", "use": ["raw-loader"] }]
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.entry, "./src/main.js");
    /// assert_eq!(config.module_rules[0].loaders, vec!["raw-loader"]);
    /// assert_eq!(config.output.filename, "bundle.js");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }
}

fn default_entry() -> String {
    DEFAULT_ENTRY.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_output_filename() -> String {
    DEFAULT_OUTPUT_FILENAME.to_string()
}
