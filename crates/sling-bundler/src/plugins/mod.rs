//! Plugins extend a build by tapping lifecycle hooks.
//!
//! A plugin is applied exactly once, when the compiler is created, and in the
//! order plugins were configured. Everything a plugin wants to do later
//! happens inside the callbacks it registers.

mod progress;
mod timing;

pub use progress::ProgressPlugin;
pub use timing::TimingPlugin;

use crate::hooks::Hooks;

/// A build extension
///
/// # Example
///
/// ```
/// use sling_bundler::{Hooks, Plugin};
///
/// struct Banner;
///
/// impl Plugin for Banner {
///     fn name(&self) -> &str {
///         "banner"
///     }
///
///     fn apply(&self, hooks: &mut Hooks) {
///         hooks.done.tap(self.name(), || {
///             println!("bundle ready");
///             Ok(())
///         });
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Name reported in errors raised by this plugin's callbacks
    fn name(&self) -> &str;

    /// Register callbacks on `hooks`.
    fn apply(&self, hooks: &mut Hooks);
}

/// Names accepted by [`builtin`]
pub const BUILTIN_PLUGINS: &[&str] = &[ProgressPlugin::NAME, TimingPlugin::NAME];

/// Instantiate a built-in plugin by its configuration name.
pub fn builtin(name: &str) -> Option<Box<dyn Plugin>> {
    match name {
        ProgressPlugin::NAME => Some(Box::new(ProgressPlugin)),
        TimingPlugin::NAME => Some(Box::new(TimingPlugin::default())),
        _ => None,
    }
}
