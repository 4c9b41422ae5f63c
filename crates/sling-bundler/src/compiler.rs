//! Build orchestration.
//!
//! The [`Compiler`] owns the hooks, the source transformer and the emitter.
//! Each [`Compiler::run`] builds a fresh module graph, renders it and writes
//! the bundle, firing the lifecycle hooks along the way.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use sling_gen::ModuleTransformer;

use crate::config::BuildConfig;
use crate::emit::BundleEmitter;
use crate::graph::{GraphBuilder, ModuleGraph};
use crate::hooks::{HookName, Hooks};
use crate::loaders::LoaderPipeline;
use crate::runtime::FsError;
use crate::{Error, Result};

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Every module included in the bundle
    pub graph: ModuleGraph,
    /// Bundle text as written
    pub bundle: String,
    /// Absolute path the bundle was written to
    pub output_path: PathBuf,
    /// Wall-clock time of the build
    pub duration: Duration,
}

impl BuildOutput {
    pub fn module_count(&self) -> usize {
        self.graph.len()
    }

    /// Bundle size in bytes
    pub fn size(&self) -> usize {
        self.bundle.len()
    }
}

/// Runs builds for one configuration
///
/// # Example
///
/// ```no_run
/// use sling_bundler::{BuildConfig, Compiler, ProgressPlugin};
///
/// let config = BuildConfig::new("/project", "./src/index.js").plugin(ProgressPlugin);
/// let mut compiler = Compiler::new(config)?;
/// let output = compiler.run()?;
/// println!("{} modules -> {}", output.module_count(), output.output_path.display());
/// # Ok::<(), sling_bundler::Error>(())
/// ```
#[derive(Debug)]
pub struct Compiler {
    config: BuildConfig,
    hooks: Hooks,
    transformer: ModuleTransformer,
    emitter: BundleEmitter,
    entry_option_fired: bool,
}

impl Compiler {
    /// Validate `config`, apply its plugins and fire `afterPlugins`.
    pub fn new(mut config: BuildConfig) -> Result<Self> {
        config.validate()?;

        let mut hooks = Hooks::new();
        for plugin in std::mem::take(&mut config.plugins) {
            tracing::debug!(plugin = plugin.name(), "applying plugin");
            plugin.apply(&mut hooks);
        }

        let transformer = ModuleTransformer::new(config.transform.clone());
        let emitter = BundleEmitter::new(&transformer.options().runtime_require_name)?;

        hooks.call(HookName::AfterPlugins)?;

        Ok(Self {
            config,
            hooks,
            transformer,
            emitter,
            entry_option_fired: false,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Hooks, for tapping after construction
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// Fire `entryOption`. Subsequent calls do nothing.
    pub fn entry_option(&mut self) -> Result<()> {
        if self.entry_option_fired {
            return Ok(());
        }
        self.entry_option_fired = true;
        self.hooks.call(HookName::EntryOption)
    }

    /// Build, render and write the bundle.
    ///
    /// Fires `entryOption` first if it has not fired yet. No bundle is
    /// written when any step fails.
    pub fn run(&mut self) -> Result<BuildOutput> {
        let start = Instant::now();

        self.entry_option()?;
        self.hooks.call(HookName::Run)?;

        self.hooks.call(HookName::Compile)?;
        let graph = self.compile()?;
        self.hooks.call(HookName::AfterCompile)?;

        let bundle = self.emitter.emit(graph.entry_id(), graph.modules())?;
        self.hooks.call(HookName::Emit)?;

        let output_path = self.config.output_path();
        self.config
            .file_system
            .write_text(&output_path, &bundle)
            .map_err(|e| Error::Write {
                path: output_path.clone(),
                reason: match e {
                    FsError::Io(reason) => reason,
                    other => other.to_string(),
                },
            })?;

        self.hooks.call(HookName::Done)?;

        let duration = start.elapsed();
        tracing::info!(
            modules = graph.len(),
            bytes = bundle.len(),
            output = %output_path.display(),
            elapsed_ms = duration.as_millis() as u64,
            "bundle written"
        );

        Ok(BuildOutput {
            graph,
            bundle,
            output_path,
            duration,
        })
    }

    /// Build the module graph without firing hooks or writing anything.
    pub fn compile(&self) -> Result<ModuleGraph> {
        let pipeline =
            LoaderPipeline::new(&self.config.rules, &self.config.loaders, &self.config.root);
        GraphBuilder::new(
            &self.config.root,
            self.config.file_system.as_ref(),
            pipeline,
            &self.transformer,
        )
        .build(&self.config.entry_path())
    }
}
