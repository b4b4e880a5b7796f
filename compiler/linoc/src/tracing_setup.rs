//! Tracing subscriber setup for the CLI.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::RunConfig;

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
pub fn default_directive(config: &RunConfig) -> &'static str {
    match (config.verbose, config.trace) {
        (true, true) => "debug,lino_eval=trace",
        (false, true) => "warn,lino_eval=trace",
        (true, false) => "debug",
        (false, false) => "warn",
    }
}

/// Install the global subscriber, writing to stderr. `RUST_LOG` wins over flags.
pub fn init_tracing(config: &RunConfig) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
