//! CLI error type.
//!
//! Configuration and build failures keep their own error types; [`CliError`]
//! only wraps them so `main` can render a single miette report.

use std::path::PathBuf;

use miette::Report;
use sling_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating `sling.config.json` failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The build itself failed
    #[error(transparent)]
    Build(#[from] sling_bundler::Error),

    /// Output path exists but is not a directory
    #[error("Output path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a CLI error into a report for `main`
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => Report::new(e),
        CliError::Config(ConfigError::NotFound(path)) => miette::miette!(
            code = "sling::config_not_found",
            help = "Create a sling.config.json in the project root, e.g. { \"entry\": \"./src/index.js\" }",
            "Config file not found: {}",
            path.display()
        ),
        CliError::Config(e) => miette::miette!(
            code = "sling::invalid_config",
            help = "Check sling.config.json",
            "Configuration error: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}
