//! Tracing subscriber setup.
//!
//! The SDK never installs a global subscriber on its own; applications call
//! [`init_tracing`] (or build their own subscriber around [`env_filter`]).

use glide_domain::LogLevel;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter for the given SDK level. `RUST_LOG` wins when set.
#[must_use]
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Install a formatted subscriber at `level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(level: LogLevel) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_target(false))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_tracing(LogLevel::Debug);
        assert!(!init_tracing(LogLevel::Error));
    }

    #[test]
    fn unset_level_filters_to_errors() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(env_filter(LogLevel::Unset).to_string(), "error");
        }
    }
}
