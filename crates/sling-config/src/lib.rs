//! Configuration for the sling bundler.
//!
//! [`SlingConfig`] is the serde model of `sling.config.json`;
//! [`ConfigDiscovery`] finds and loads it from a project root.

pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use config::*;
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, ENV_PREFIX};
pub use error::*;
