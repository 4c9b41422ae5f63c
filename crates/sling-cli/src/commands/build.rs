//! The build command.
//!
//! Loads `sling.config.json`, resolves it into a [`BuildConfig`], makes sure
//! the output directory exists and runs the compiler with the full
//! lifecycle.

use std::fs;
use std::path::Path;

use sling_bundler::{BuildConfig, BuildOutput, Compiler};
use sling_config::ConfigDiscovery;

use crate::error::{CliError, Result};
use crate::ui;

/// Build the project in the current directory.
pub fn execute() -> Result<BuildOutput> {
    let root = std::env::current_dir()?;
    execute_in(&root)
}

/// Build the project rooted at `root`.
pub fn execute_in(root: &Path) -> Result<BuildOutput> {
    let config = ConfigDiscovery::new(root).load()?;
    tracing::debug!(?config, "configuration loaded");

    let build = BuildConfig::from_sling_config(root, &config)?;
    ensure_output_dir(&build.output_dir())?;

    ui::info(&format!("Bundling {}", config.entry));

    let mut compiler = Compiler::new(build)?;
    compiler.entry_option()?;
    let output = compiler.run()?;

    ui::success(&format!("Wrote {}", output.output_path.display()));
    ui::print_build_summary(
        &output.output_path,
        output.module_count(),
        output.size() as u64,
        output.duration,
    );
    println!("{}", output.output_path.display());

    Ok(output)
}

/// Create `out_dir` if needed.
///
/// # Errors
///
/// Fails when the path exists but is not a directory, or it cannot be
/// created.
pub fn ensure_output_dir(out_dir: &Path) -> Result<()> {
    if !out_dir.exists() {
        fs::create_dir_all(out_dir)?;
    } else if !out_dir.is_dir() {
        return Err(CliError::NotADirectory(out_dir.to_path_buf()));
    }
    Ok(())
}
