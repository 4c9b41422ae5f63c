//! Module graph construction.
//!
//! Starting from the entry file, every reachable module is read, run through
//! the loader pipeline and the source transformer, and registered under its
//! canonical id. Traversal is a depth-first walk over an explicit stack in
//! dependency discovery order; a visited set guarantees each module is
//! processed at most once, so circular dependencies terminate.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use sling_gen::ModuleTransformer;
use sling_gen::specifier::{module_id_for_path, parent_dir, resolve_id};

use crate::loaders::LoaderPipeline;
use crate::runtime::{FileSystem, FsError};
use crate::{Error, Result};

/// Canonical module identifier: `./` followed by the root-relative path
/// with forward slashes (`./src/index.js`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Id of the file at `path` within `root`
    pub fn from_path(root: &Path, path: &Path) -> Self {
        Self(module_id_for_path(root, path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the id, used to resolve the module's own requests
    pub fn parent_dir(&self) -> &str {
        parent_dir(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::borrow::Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A processed module. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    source: String,
    dependencies: Vec<ModuleId>,
}

impl Module {
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Source after loaders and dependency rewriting
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Canonical ids of the dependencies, in source order, duplicates kept
    pub fn dependencies(&self) -> &[ModuleId] {
        &self.dependencies
    }
}

/// Every module reachable from the entry, in discovery order
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    entry_id: ModuleId,
    modules: IndexMap<ModuleId, Module>,
}

impl ModuleGraph {
    pub fn entry_id(&self) -> &ModuleId {
        &self.entry_id
    }

    pub fn entry(&self) -> Option<&Module> {
        self.modules.get(&self.entry_id)
    }

    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// Modules keyed by id, in discovery order
    pub fn modules(&self) -> &IndexMap<ModuleId, Module> {
        &self.modules
    }

    /// Ids in discovery order
    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[derive(Default)]
struct BuildState {
    visited: FxHashSet<ModuleId>,
    modules: IndexMap<ModuleId, Module>,
    entry_id: Option<ModuleId>,
}

/// Walks the dependency graph of one build
pub struct GraphBuilder<'a> {
    root: &'a Path,
    fs: &'a dyn FileSystem,
    pipeline: LoaderPipeline<'a>,
    transformer: &'a ModuleTransformer,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        root: &'a Path,
        fs: &'a dyn FileSystem,
        pipeline: LoaderPipeline<'a>,
        transformer: &'a ModuleTransformer,
    ) -> Self {
        Self {
            root,
            fs,
            pipeline,
            transformer,
        }
    }

    /// Build the graph reachable from `entry`.
    ///
    /// # Errors
    ///
    /// The first missing file, unreadable file, loader failure or parse
    /// failure aborts the whole build.
    pub fn build(&self, entry: &Path) -> Result<ModuleGraph> {
        let mut state = BuildState::default();
        let mut stack = vec![(entry.to_path_buf(), true)];

        while let Some((path, is_entry)) = stack.pop() {
            let pending = self.build_module(&path, is_entry, &mut state)?;
            stack.extend(pending.into_iter().rev().map(|dep| (dep, false)));
        }

        let entry_id = state
            .entry_id
            .ok_or_else(|| Error::InvalidConfig(format!("entry {} was not built", entry.display())))?;

        tracing::info!(entry = %entry_id, modules = state.modules.len(), "module graph built");

        Ok(ModuleGraph {
            entry_id,
            modules: state.modules,
        })
    }

    /// Process one module and return the absolute paths of its dependencies
    /// in discovery order. Already visited modules yield nothing.
    fn build_module(
        &self,
        path: &Path,
        is_entry: bool,
        state: &mut BuildState,
    ) -> Result<Vec<PathBuf>> {
        let id = ModuleId::from_path(self.root, path);
        if !state.visited.insert(id.clone()) {
            tracing::trace!(module = %id, "already visited");
            return Ok(Vec::new());
        }

        let raw = self.fs.read_text(path).map_err(|e| match e {
            FsError::FileNotFound(_) => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            FsError::Io(reason) => Error::Read {
                path: path.to_path_buf(),
                reason,
            },
        })?;

        let loaded = self.pipeline.load(path, raw)?;

        let output = self
            .transformer
            .transform(&loaded, id.parent_dir())
            .map_err(|source| Error::Parse {
                module_id: id.to_string(),
                source,
            })?;

        let dependencies: Vec<ModuleId> =
            output.dependencies.into_iter().map(ModuleId::from).collect();
        let pending = dependencies
            .iter()
            .map(|dep| resolve_id(self.root, dep.as_str()))
            .collect();

        tracing::debug!(module = %id, dependencies = dependencies.len(), "module built");

        if is_entry && state.entry_id.is_none() {
            state.entry_id = Some(id.clone());
        }

        state.modules.insert(
            id.clone(),
            Module {
                id,
                source: output.code,
                dependencies,
            },
        );

        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::LoaderRegistry;
    use crate::runtime::MemoryFileSystem;

    fn build(fs: &MemoryFileSystem, entry: &str) -> Result<ModuleGraph> {
        let registry = LoaderRegistry::default();
        let transformer = ModuleTransformer::default();
        let root = Path::new("/p");
        let pipeline = LoaderPipeline::new(&[], &registry, root);
        GraphBuilder::new(root, fs, pipeline, &transformer).build(&root.join(entry))
    }

    #[test]
    fn module_id_helpers() {
        let id = ModuleId::from_path(Path::new("/p"), Path::new("/p/src/lib/a.js"));
        assert_eq!(id.as_str(), "./src/lib/a.js");
        assert_eq!(id.parent_dir(), "./src/lib");
    }

    #[test]
    fn traversal_is_depth_first_in_discovery_order() {
        let fs = MemoryFileSystem::new("/p")
            .with_file("/p/src/index.js", "require('./a'); require('./c');")
            .with_file("/p/src/a.js", "require('./b');")
            .with_file("/p/src/b.js", "")
            .with_file("/p/src/c.js", "");

        let graph = build(&fs, "src/index.js").unwrap();
        let ids: Vec<&str> = graph.ids().map(ModuleId::as_str).collect();
        assert_eq!(ids, vec!["./src/index.js", "./src/a.js", "./src/b.js", "./src/c.js"]);
    }

    #[test]
    fn shared_dependency_is_registered_once() {
        let fs = MemoryFileSystem::new("/p")
            .with_file("/p/src/index.js", "require('./a'); require('./b');")
            .with_file("/p/src/a.js", "require('./shared');")
            .with_file("/p/src/b.js", "require('./shared');")
            .with_file("/p/src/shared.js", "module.exports = 1;");

        let graph = build(&fs, "src/index.js").unwrap();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.ids().filter(|id| id.as_str() == "./src/shared.js").count(), 1);
    }

    #[test]
    fn entry_id_is_the_entry_module() {
        let fs = MemoryFileSystem::new("/p")
            .with_file("/p/main.js", "require('./lib/x');")
            .with_file("/p/lib/x.js", "require('../main');");

        let graph = build(&fs, "main.js").unwrap();
        assert_eq!(graph.entry_id().as_str(), "./main.js");
        assert_eq!(graph.entry().unwrap().dependencies()[0].as_str(), "./lib/x.js");
        assert_eq!(graph.get("./lib/x.js").unwrap().dependencies()[0].as_str(), "./main.js");
    }

    #[test]
    fn unreadable_dependency_aborts() {
        let fs = MemoryFileSystem::new("/p").with_file("/p/index.js", "require('./gone');");

        let err = build(&fs, "index.js").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { path } if path == Path::new("/p/gone.js")));
    }
}
