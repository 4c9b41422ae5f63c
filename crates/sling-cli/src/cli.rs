//! Command-line interface definition.

use clap::Parser;

/// Sling - a static CommonJS bundler
#[derive(Parser, Debug)]
#[command(
    name = "sling",
    version,
    about = "Bundle a CommonJS project into a single script",
    long_about = "Sling reads sling.config.json from the current directory, follows every\n\
                  require() call from the entry module, runs matching files through their\n\
                  loaders and writes one self-contained bundle."
)]
pub struct Cli {}
