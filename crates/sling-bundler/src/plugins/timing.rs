use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::hooks::Hooks;
use crate::plugins::Plugin;

/// Measures wall-clock time from `run` to `done`.
///
/// The last measured duration stays readable through [`TimingPlugin::last`]
/// on any clone of the plugin.
#[derive(Debug, Clone, Default)]
pub struct TimingPlugin {
    started: Arc<Mutex<Option<Instant>>>,
    last: Arc<Mutex<Option<Duration>>>,
}

impl TimingPlugin {
    pub const NAME: &'static str = "timing";

    pub fn new() -> Self {
        Self::default()
    }

    /// Duration of the most recent completed build
    pub fn last(&self) -> Option<Duration> {
        *self.last.lock()
    }
}

impl Plugin for TimingPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, hooks: &mut Hooks) {
        let started = Arc::clone(&self.started);
        hooks.run.tap(Self::NAME, move || {
            *started.lock() = Some(Instant::now());
            Ok(())
        });

        let started = Arc::clone(&self.started);
        let last = Arc::clone(&self.last);
        hooks.done.tap(Self::NAME, move || {
            if let Some(start) = started.lock().take() {
                let elapsed = start.elapsed();
                *last.lock() = Some(elapsed);
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "build took {elapsed:?}");
            }
            Ok(())
        });
    }
}
