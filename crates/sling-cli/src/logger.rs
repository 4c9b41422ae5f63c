//! Logging setup for the CLI.
//!
//! `RUST_LOG` overrides the default filter, e.g.
//! `RUST_LOG=sling_bundler=debug sling` to see every module and hook.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "warn,sling_bundler=info,sling_config=info,sling_cli=info";

/// Install the global tracing subscriber.
///
/// Calling it a second time in the same process has no effect.
pub fn init_logger(no_color: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
