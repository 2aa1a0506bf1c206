//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Environment variable holding a filter directive, e.g. `debug` or `marquee=trace`.
pub const LOG_ENV: &str = "MARQUEE_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: `$MARQUEE_LOG`, else `log.level`, else `warn`.
fn directive(config: Option<&Config>) -> String {
    if let Ok(value) = std::env::var(LOG_ENV)
        && !value.trim().is_empty()
    {
        return value;
    }
    config
        .and_then(Config::log_level)
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Install the global subscriber, writing to stderr. An unparseable
/// directive falls back to the default level. Safe to call more than once.
pub fn init_tracing(config: Option<&Config>) {
    let directive = directive(config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
