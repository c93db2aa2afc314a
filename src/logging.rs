//! Structured logging setup using the `tracing` ecosystem.
//!
//! JSON output for containers, pretty output for a terminal. The format
//! is picked from the TTY unless `--json` or `--pretty` forces it.

use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty || std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Level for this crate and the HTTP layers; connection pool chatter from
/// hyper and rustls is capped at `warn`.
#[must_use]
pub fn filter(level: &LogLevel) -> Targets {
    let level = level.to_tracing_level();
    Targets::new()
        .with_default(level)
        .with_target("hyper_util", tracing::Level::WARN.min(level))
        .with_target("rustls", tracing::Level::WARN.min(level))
}

/// Install the global subscriber. With `sentry-integration`, error events
/// are also forwarded to Sentry.
pub fn init(level: &LogLevel, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(filter(level));

    #[cfg(feature = "sentry-integration")]
    let registry = registry.with(sentry_tracing::layer());

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(false))
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins() {
        assert_eq!(resolve_format(false, true), LogFormat::Json);
        assert_eq!(resolve_format(true, false), LogFormat::Pretty);
    }

    #[test]
    fn pool_chatter_is_capped() {
        let targets = filter(&LogLevel::Trace);
        assert!(targets.would_enable("zabbix_map::api", &tracing::Level::TRACE));
        assert!(!targets.would_enable("hyper_util::client", &tracing::Level::DEBUG));
        assert!(targets.would_enable("hyper_util::client", &tracing::Level::WARN));

        let targets = filter(&LogLevel::Error);
        assert!(!targets.would_enable("hyper_util::client", &tracing::Level::WARN));
    }
}
