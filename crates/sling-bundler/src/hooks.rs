//! Lifecycle hooks.
//!
//! A build exposes a fixed set of named extension points. Plugins tap them in
//! [`Plugin::apply`](crate::plugins::Plugin::apply); the compiler calls each
//! hook exactly once per successful build, in this order:
//!
//! | Hook | Fired |
//! |---|---|
//! | `afterPlugins` | after every plugin was applied |
//! | `entryOption` | before any build work |
//! | `run` | start of the build |
//! | `compile` | before graph construction |
//! | `afterCompile` | after the graph was built |
//! | `emit` | after the bundle was rendered, before it is written |
//! | `done` | after the bundle was written |

use std::fmt;

use crate::{Error, Result};

/// Names of the lifecycle hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookName {
    AfterPlugins,
    EntryOption,
    Run,
    Compile,
    AfterCompile,
    Emit,
    Done,
}

impl HookName {
    /// All hooks in firing order
    pub const ALL: [HookName; 7] = [
        HookName::AfterPlugins,
        HookName::EntryOption,
        HookName::Run,
        HookName::Compile,
        HookName::AfterCompile,
        HookName::Emit,
        HookName::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookName::AfterPlugins => "afterPlugins",
            HookName::EntryOption => "entryOption",
            HookName::Run => "run",
            HookName::Compile => "compile",
            HookName::AfterCompile => "afterCompile",
            HookName::Emit => "emit",
            HookName::Done => "done",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback registered on a hook
pub type HookCallback = Box<dyn FnMut() -> anyhow::Result<()> + Send>;

struct Tap {
    plugin: String,
    callback: HookCallback,
}

/// Ordered list of zero-argument callbacks, called synchronously.
pub struct SyncHook {
    name: HookName,
    taps: Vec<Tap>,
}

impl SyncHook {
    pub fn new(name: HookName) -> Self {
        Self {
            name,
            taps: Vec::new(),
        }
    }

    pub fn name(&self) -> HookName {
        self.name
    }

    /// Register `callback` on behalf of `plugin`.
    ///
    /// Callbacks run in registration order.
    pub fn tap<F>(&mut self, plugin: impl Into<String>, callback: F)
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        self.taps.push(Tap {
            plugin: plugin.into(),
            callback: Box::new(callback),
        });
    }

    /// Invoke every callback in registration order.
    ///
    /// Stops at the first failing callback.
    pub fn call(&mut self) -> Result<()> {
        tracing::debug!(hook = %self.name, taps = self.taps.len(), "calling hook");

        for tap in &mut self.taps {
            (tap.callback)().map_err(|source| Error::Plugin {
                hook: self.name,
                plugin: tap.plugin.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Plugin names in tap order
    pub fn taps(&self) -> impl Iterator<Item = &str> {
        self.taps.iter().map(|tap| tap.plugin.as_str())
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

impl fmt::Debug for SyncHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHook")
            .field("name", &self.name)
            .field("taps", &self.taps().collect::<Vec<_>>())
            .finish()
    }
}

/// The complete set of lifecycle hooks of a compiler
#[derive(Debug)]
pub struct Hooks {
    pub after_plugins: SyncHook,
    pub entry_option: SyncHook,
    pub run: SyncHook,
    pub compile: SyncHook,
    pub after_compile: SyncHook,
    pub emit: SyncHook,
    pub done: SyncHook,
}

impl Hooks {
    pub fn new() -> Self {
        Self {
            after_plugins: SyncHook::new(HookName::AfterPlugins),
            entry_option: SyncHook::new(HookName::EntryOption),
            run: SyncHook::new(HookName::Run),
            compile: SyncHook::new(HookName::Compile),
            after_compile: SyncHook::new(HookName::AfterCompile),
            emit: SyncHook::new(HookName::Emit),
            done: SyncHook::new(HookName::Done),
        }
    }

    /// Look a hook up by name
    pub fn get_mut(&mut self, name: HookName) -> &mut SyncHook {
        match name {
            HookName::AfterPlugins => &mut self.after_plugins,
            HookName::EntryOption => &mut self.entry_option,
            HookName::Run => &mut self.run,
            HookName::Compile => &mut self.compile,
            HookName::AfterCompile => &mut self.after_compile,
            HookName::Emit => &mut self.emit,
            HookName::Done => &mut self.done,
        }
    }

    pub(crate) fn call(&mut self, name: HookName) -> Result<()> {
        self.get_mut(name).call()
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}
