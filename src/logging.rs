//! Tracing subscriber setup.
//!
//! Logs go to stderr so the agent output relayed on stdout stays clean.
//! Filter priority: `RUST_LOG` > `--log-level` > `debug` under `RUNNER_DEBUG=1`
//! > `info`.

use crate::config::types::RUNNER_DEBUG_VAR;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Pick the filter directive used when `RUST_LOG` is unset.
pub fn fallback_filter(cli_level: Option<&str>, runner_debug: bool) -> &str {
    match cli_level {
        Some(level) => level,
        None if runner_debug => "debug",
        None => DEFAULT_LOG_LEVEL,
    }
}

/// Install the global subscriber.
pub fn init(cli_level: Option<&str>) {
    let runner_debug = std::env::var(RUNNER_DEBUG_VAR).as_deref() == Ok("1");
    let fallback = fallback_filter(cli_level, runner_debug);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .try_init();
}
