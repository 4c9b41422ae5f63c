//! File-based config discovery for CLI use
//!
//! The configuration lives in a fixed, well-known file in the project root.
//! Values from the file are layered over the defaults with `figment`, and
//! `SLING_` prefixed environment variables override both
//! (`SLING_ENTRY=./src/main.js`, `SLING_OUTPUT__FILENAME=app.js`).

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};

use crate::config::SlingConfig;
use crate::error::{ConfigError, Result};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "sling.config.json";

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "SLING_";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use sling_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Project root this discovery searches
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the config file, if it exists
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load and validate the config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, and
    /// `ConfigError::InvalidValue` for malformed JSON or wrong field types.
    pub fn load(&self) -> Result<SlingConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.join(CONFIG_FILE_NAME)))?;

        tracing::debug!(path = %path.display(), "loading configuration");

        let config: SlingConfig = Figment::new()
            .merge(Serialized::defaults(SlingConfig::default()))
            .merge(Json::file(&path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .only(&["entry", "output.path", "output.filename"]),
            )
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: CONFIG_FILE_NAME.to_string(),
                hint: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }
}
