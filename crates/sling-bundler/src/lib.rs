#![cfg_attr(docsrs, feature(doc_cfg))]

//! # sling-bundler
//!
//! A static CommonJS bundler. Starting from an entry file, sling follows
//! every `require("...")` call, runs each file through the configured
//! loaders, rewrites the calls to canonical module ids and emits one
//! self-contained script.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sling_bundler::{BuildConfig, Compiler, ModuleRule};
//!
//! let config = BuildConfig::new("/project", "./src/index.js")
//!     .output("dist", "bundle.js")
//!     .rule(ModuleRule::new("\\.css$", ["style-loader"])?);
//!
//! let mut compiler = Compiler::new(config)?;
//! compiler.entry_option()?;
//! let output = compiler.run()?;
//! println!("wrote {} modules", output.module_count());
//! # Ok::<(), sling_bundler::Error>(())
//! ```
//!
//! ## Building in memory
//!
//! ```
//! use std::sync::Arc;
//! use sling_bundler::{BuildConfig, Compiler, MemoryFileSystem};
//!
//! let fs = MemoryFileSystem::new("/p")
//!     .with_file("/p/src/index.js", "const a = require('./a'); console.log(a);")
//!     .with_file("/p/src/a.js", "module.exports = 42;");
//!
//! let config = BuildConfig::new("/p", "./src/index.js").file_system(Arc::new(fs.clone()));
//! let output = Compiler::new(config)?.run()?;
//!
//! assert_eq!(output.module_count(), 2);
//! assert!(fs.file("/p/dist/bundle.js").is_some());
//! # Ok::<(), sling_bundler::Error>(())
//! ```

use std::path::PathBuf;

pub mod compiler;
pub mod config;
pub mod emit;
pub mod graph;
pub mod hooks;
pub mod loaders;
pub mod plugins;
pub mod runtime;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use compiler::{BuildOutput, Compiler};
pub use config::{BuildConfig, OutputConfig};
pub use emit::BundleEmitter;
pub use graph::{GraphBuilder, Module, ModuleGraph, ModuleId};
pub use hooks::{HookCallback, HookName, Hooks, SyncHook};
pub use loaders::{
    FnLoader, JsonLoader, Loader, LoaderContext, LoaderPipeline, LoaderRegistry, ModuleRule,
    RawLoader, StyleLoader, loader_fn,
};
pub use plugins::{BUILTIN_PLUGINS, Plugin, ProgressPlugin, TimingPlugin};
pub use runtime::{FileSystem, FsError, FsResult, MemoryFileSystem, NativeFileSystem};

pub use sling_gen::{GenError, TransformOptions};

/// Error types for sling-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Entry or dependency file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// File exists but could not be read.
    #[error("Failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// Module text is not valid JavaScript after loaders ran.
    #[error("Failed to parse module {module_id}: {source}")]
    Parse {
        module_id: String,
        #[source]
        source: GenError,
    },

    /// A loader is missing or failed.
    #[error("Loader '{transformer}' failed on {}: {reason}", path.display())]
    Transformer {
        path: PathBuf,
        transformer: String,
        reason: String,
    },

    /// The bundle could not be written.
    #[error("Failed to write bundle to {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// A hook callback failed.
    #[error("Plugin '{plugin}' failed during '{hook}': {source}")]
    Plugin {
        hook: HookName,
        plugin: String,
        #[source]
        source: anyhow::Error,
    },

    /// The runtime template failed to render.
    #[error("Failed to render bundle: {0}")]
    Render(#[from] minijinja::Error),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for sling-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::FileNotFound { .. } => "sling::file_not_found",
            Error::Read { .. } => "sling::read",
            Error::Parse { .. } => "sling::parse",
            Error::Transformer { .. } => "sling::loader",
            Error::Write { .. } => "sling::write",
            Error::Plugin { .. } => "sling::plugin",
            Error::Render(_) => "sling::render",
            Error::InvalidConfig(_) => "sling::invalid_config",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::FileNotFound { path } => Some(Box::new(format!(
                "Check that '{}' exists. Requests without an extension get '.js' appended.",
                path.display()
            ))),
            Error::Parse { source, .. } => Some(Box::new(format!(
                "Only JavaScript can be bundled. Add a module rule with a loader for this file type.\n{}",
                source.diagnostics().join("\n")
            ))),
            Error::Transformer { transformer, .. } => Some(Box::new(format!(
                "Check that the loader '{transformer}' is registered and accepts this file."
            ))),
            Error::Write { .. } => Some(Box::new(
                "Make sure the output directory exists and is writable.",
            )),
            Error::Plugin { plugin, .. } => Some(Box::new(format!(
                "The build was aborted by the '{plugin}' plugin."
            ))),
            Error::InvalidConfig(_) => Some(Box::new("Check your sling.config.json.")),
            Error::Read { .. } | Error::Render(_) => None,
        }
    }
}
