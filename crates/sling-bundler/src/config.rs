//! Build configuration types.
//!
//! `BuildConfig` is the resolved, in-memory form of a build: absolute paths,
//! compiled rules, plugin instances and the filesystem to use. It is created
//! either with the builder methods or from a loaded [`SlingConfig`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use sling_config::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILENAME, SlingConfig};
use sling_gen::TransformOptions;

use crate::loaders::{Loader, LoaderRegistry, ModuleRule};
use crate::plugins::{self, BUILTIN_PLUGINS, Plugin};
use crate::runtime::{FileSystem, NativeFileSystem};
use crate::{Error, Result};

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Output directory, relative to the root unless absolute
    pub dir: PathBuf,
    /// Bundle file name inside `dir`
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

/// Build configuration
///
/// ```
/// use sling_bundler::{BuildConfig, ModuleRule};
///
/// let config = BuildConfig::new("/project", "./src/index.js")
///     .output("build", "app.js")
///     .rule(ModuleRule::new("\\.txt$", ["raw-loader"]).unwrap());
///
/// assert_eq!(config.entry_path(), std::path::Path::new("/project/src/index.js"));
/// assert_eq!(config.output_path(), std::path::Path::new("/project/build/app.js"));
/// ```
pub struct BuildConfig {
    /// Project root; module ids are relative to it
    pub root: PathBuf,

    /// Entry module, relative to the root unless absolute
    pub entry: PathBuf,

    /// Where the bundle is written
    pub output: OutputConfig,

    /// Ordered loader rules
    pub rules: Vec<ModuleRule>,

    /// Plugins, applied in order when the compiler is created
    pub plugins: Vec<Box<dyn Plugin>>,

    /// Loaders available to rules
    pub loaders: LoaderRegistry,

    /// Filesystem for reading modules and writing the bundle
    pub file_system: Arc<dyn FileSystem>,

    /// Source transformer options
    pub transform: TransformOptions,
}

impl BuildConfig {
    /// Create a config with default output, no rules and no plugins
    pub fn new(root: impl Into<PathBuf>, entry: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entry: entry.into(),
            output: OutputConfig::default(),
            rules: Vec::new(),
            plugins: Vec::new(),
            loaders: LoaderRegistry::with_builtins(),
            file_system: Arc::new(NativeFileSystem),
            transform: TransformOptions::default(),
        }
    }

    /// Resolve a loaded file configuration against `root`.
    ///
    /// Plugin names are looked up among the built-in plugins.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an unknown plugin name or a rule
    /// whose test does not compile.
    pub fn from_sling_config(root: impl Into<PathBuf>, config: &SlingConfig) -> Result<Self> {
        let mut build = Self::new(root, &config.entry)
            .output(&config.output.path, &config.output.filename);

        for rule in &config.module_rules {
            build = build.rule(ModuleRule::new(&rule.test, rule.loaders.iter().cloned())?);
        }

        for name in &config.plugins {
            let plugin = plugins::builtin(name).ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "unknown plugin '{name}' (available: {})",
                    BUILTIN_PLUGINS.join(", ")
                ))
            })?;
            build.plugins.push(plugin);
        }

        Ok(build)
    }

    /// Set the output directory and bundle file name
    pub fn output(mut self, dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        self.output = OutputConfig {
            dir: dir.into(),
            filename: filename.into(),
        };
        self
    }

    /// Append a module rule
    pub fn rule(mut self, rule: ModuleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a plugin
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Register a loader
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loaders.register(loader);
        self
    }

    /// Use a different filesystem
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.file_system = fs;
        self
    }

    /// Override the source transformer options
    pub fn transform(mut self, options: TransformOptions) -> Self {
        self.transform = options;
        self
    }

    /// Absolute, cleaned path of the entry module
    pub fn entry_path(&self) -> PathBuf {
        self.resolve(&self.entry)
    }

    /// Absolute, cleaned path of the output directory
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output.dir)
    }

    /// Absolute, cleaned path of the bundle file
    pub fn output_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.filename)
    }

    /// Check the parts of the config no builder method can enforce.
    pub fn validate(&self) -> Result<()> {
        if self.entry.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("entry must not be empty".to_string()));
        }
        if self.output.filename.is_empty() || self.output.filename.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "output filename '{}' must be a plain file name",
                self.output.filename
            )));
        }
        if self.transform.import_name == self.transform.runtime_require_name {
            return Err(Error::InvalidConfig(
                "runtime require name must differ from the dependency import name".to_string(),
            ));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path).clean()
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("root", &self.root)
            .field("entry", &self.entry)
            .field("output", &self.output)
            .field("rules", &self.rules)
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("loaders", &self.loaders)
            .field("file_system", &self.file_system)
            .field("transform", &self.transform)
            .finish()
    }
}
