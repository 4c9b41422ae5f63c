//! Sling CLI - bundle a CommonJS project into a single script.
//!
//! The binary takes no options: it reads `sling.config.json` from the
//! current directory, builds the bundle and prints a summary.
//!
//! - [`cli`] - argument definition
//! - [`commands`] - the build command
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages and summary formatting

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
