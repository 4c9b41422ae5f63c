//! Loaders turn a file's raw text into JavaScript source.
//!
//! Loaders are looked up by name in a [`LoaderRegistry`]; a
//! [`ModuleRule`](pipeline::ModuleRule) names the chain of loaders that
//! applies to the files it matches.

mod builtin;
mod pipeline;

pub use builtin::{JsonLoader, RawLoader, StyleLoader};
pub use pipeline::{LoaderPipeline, ModuleRule};

use rustc_hash::FxHashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// What a loader knows about the file it processes
#[derive(Debug, Clone, Copy)]
pub struct LoaderContext<'a> {
    /// Absolute path of the file being loaded
    pub resource_path: &'a Path,
    /// Build root
    pub root: &'a Path,
}

/// A single content transformation step
pub trait Loader: Send + Sync {
    /// Name used to reference this loader from module rules
    fn name(&self) -> &str;

    /// Transform `source` and return the new text.
    fn load(&self, source: String, ctx: &LoaderContext<'_>) -> anyhow::Result<String>;
}

/// Loader backed by a closure, see [`loader_fn`]
pub struct FnLoader<F> {
    name: String,
    func: F,
}

impl<F> Loader for FnLoader<F>
where
    F: Fn(String, &LoaderContext<'_>) -> anyhow::Result<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, source: String, ctx: &LoaderContext<'_>) -> anyhow::Result<String> {
        (self.func)(source, ctx)
    }
}

/// Create a loader from a closure.
///
/// ```
/// use sling_bundler::loader_fn;
///
/// let upper = loader_fn("upper", |source, _ctx| Ok(source.to_uppercase()));
/// ```
pub fn loader_fn<F>(name: impl Into<String>, func: F) -> FnLoader<F>
where
    F: Fn(String, &LoaderContext<'_>) -> anyhow::Result<String> + Send + Sync,
{
    FnLoader {
        name: name.into(),
        func,
    }
}

/// Loaders available to a build, keyed by name
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: FxHashMap<String, Arc<dyn Loader>>,
}

impl LoaderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            loaders: FxHashMap::default(),
        }
    }

    /// Registry preloaded with `raw-loader`, `json-loader` and `style-loader`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RawLoader);
        registry.register(JsonLoader);
        registry.register(StyleLoader);
        registry
    }

    /// Register a loader, replacing any loader with the same name
    pub fn register(&mut self, loader: impl Loader + 'static) {
        let loader: Arc<dyn Loader> = Arc::new(loader);
        self.loaders.insert(loader.name().to_string(), loader);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Loader>> {
        self.loaders.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("loaders", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_builtins() {
        let registry = LoaderRegistry::default();
        assert_eq!(registry.names(), vec!["json-loader", "raw-loader", "style-loader"]);
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = LoaderRegistry::new();
        registry.register(loader_fn("x", |s, _| Ok(s)));
        registry.register(loader_fn("x", |_, _| Ok("replaced".to_string())));

        let ctx = LoaderContext {
            resource_path: Path::new("/p/a.js"),
            root: Path::new("/p"),
        };
        let out = registry.get("x").unwrap().load("orig".to_string(), &ctx).unwrap();
        assert_eq!(out, "replaced");
        assert_eq!(registry.names().len(), 1);
    }
}
