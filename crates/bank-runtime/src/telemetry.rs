//! Tracing initialisation

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable selecting the log format (`json` or anything else)
pub const LOG_FORMAT_VAR: &str = "BANK_LOG_FORMAT";

/// Install the global subscriber: `RUST_LOG` filter (default `info`),
/// human-readable or JSON lines on stderr
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json, "logging initialized");
    }
}
