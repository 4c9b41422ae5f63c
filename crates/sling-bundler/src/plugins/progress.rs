use crate::hooks::{HookName, Hooks};
use crate::plugins::Plugin;

/// Logs every lifecycle phase at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressPlugin;

impl ProgressPlugin {
    pub const NAME: &'static str = "progress";
}

impl Plugin for ProgressPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, hooks: &mut Hooks) {
        for hook in HookName::ALL {
            hooks.get_mut(hook).tap(Self::NAME, move || {
                tracing::info!(phase = %hook, "{}", describe(hook));
                Ok(())
            });
        }
    }
}

fn describe(hook: HookName) -> &'static str {
    match hook {
        HookName::AfterPlugins => "plugins applied",
        HookName::EntryOption => "entry resolved",
        HookName::Run => "build started",
        HookName::Compile => "building module graph",
        HookName::AfterCompile => "module graph complete",
        HookName::Emit => "bundle rendered",
        HookName::Done => "build finished",
    }
}
