//! Sling CLI entry point.
//!
//! Parses arguments (only `--help` and `--version` exist), sets up logging
//! and runs a build of the project in the current directory.

use clap::Parser;
use miette::Result;
use sling_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let _args = cli::Cli::parse();

    logger::init_logger(!ui::should_use_color());

    commands::build::execute()
        .map(|_| ())
        .map_err(error::cli_error_to_miette)
}
