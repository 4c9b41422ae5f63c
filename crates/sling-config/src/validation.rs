//! Schema validation (no filesystem checks).

use regex::Regex;

use crate::config::SlingConfig;
use crate::error::{ConfigError, Result};

impl SlingConfig {
    /// Validate configuration for logical consistency.
    ///
    /// Entry existence is not checked here; a missing entry surfaces as a
    /// file-not-found error from the build itself.
    pub fn validate(&self) -> Result<()> {
        if self.entry.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Provide the path of the entry module, e.g. \"./src/index.js\"".to_string(),
            });
        }

        if self.output.filename.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "output.filename".to_string(),
                hint: "Provide a bundle file name, e.g. \"bundle.js\"".to_string(),
            });
        }

        if self.output.filename.contains(['/', '\\']) {
            return Err(ConfigError::invalid(
                "output.filename",
                "Use output.path for directories; filename must be a plain file name",
            ));
        }

        for (index, rule) in self.module_rules.iter().enumerate() {
            if let Err(err) = Regex::new(&rule.test) {
                return Err(ConfigError::invalid(
                    format!("moduleRules[{index}].test"),
                    format!("'{}' is not a valid regular expression: {err}", rule.test),
                ));
            }

            if rule.loaders.is_empty() {
                return Err(ConfigError::MissingField {
                    field: format!("moduleRules[{index}].use"),
                    hint: "List at least one loader for the rule".to_string(),
                });
            }

            if rule.loaders.iter().any(|name| name.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    format!("moduleRules[{index}].use"),
                    "Loader names cannot be empty",
                ));
            }
        }

        if self.plugins.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::invalid("plugins", "Plugin names cannot be empty"));
        }

        Ok(())
    }
}
