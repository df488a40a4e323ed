//! Structured logging setup.
//!
//! Console tracing subscriber with an environment-aware default level;
//! `RUST_LOG` overrides everything.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the global tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let default_level = default_log_level(&environment());
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter);

        // Tests may install their own subscriber first; that is not an error.
        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}

fn environment() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_per_environment() {
        assert_eq!(default_log_level("production"), "info");
        assert_eq!(default_log_level("development"), "debug");
        assert_eq!(default_log_level("anything-else"), "debug");
    }
}
