//! Shared fixtures for bundler integration tests

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use sling_bundler::{BuildConfig, HookName, Hooks, MemoryFileSystem, Plugin};

pub const ROOT: &str = "/project";

/// In-memory project rooted at [`ROOT`]; paths are relative to the root.
pub fn project(files: &[(&str, &str)]) -> MemoryFileSystem {
    let fs = MemoryFileSystem::new(ROOT);
    for (path, content) in files {
        fs.add_file(format!("{ROOT}/{path}"), *content);
    }
    fs
}

pub fn config(fs: &MemoryFileSystem) -> BuildConfig {
    BuildConfig::new(ROOT, "./src/index.js").file_system(Arc::new(fs.clone()))
}

/// Records the name of every hook it sees, in firing order.
#[derive(Clone, Default)]
pub struct Recorder {
    pub fired: Arc<Mutex<Vec<HookName>>>,
}

impl Recorder {
    pub fn fired(&self) -> Vec<HookName> {
        self.fired.lock().clone()
    }
}

impl Plugin for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn apply(&self, hooks: &mut Hooks) {
        for hook in HookName::ALL {
            let fired = Arc::clone(&self.fired);
            hooks.get_mut(hook).tap("recorder", move || {
                fired.lock().push(hook);
                Ok(())
            });
        }
    }
}
