//! Structured logging for coin-bias.
//!
//! - Human-readable console output for interactive use
//! - JSONL for scripted runs
//!
//! stdout is reserved for command payloads (chart, JSON, Markdown); every
//! log line goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, ENV_LOG_FORMAT, ENV_LOG_LEVEL};

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter: `RUST_LOG` directives are honored verbatim unless
/// `COIN_BIAS_LOG` or a CLI flag picked the level.
fn build_filter(config: &LogConfig, honor_rust_log: bool) -> EnvFilter {
    if honor_rust_log {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(config.level.to_string())
}

/// Initialize the logging subsystem.
///
/// Call once at startup. A second call is a no-op, so tests may call it
/// freely.
pub fn init_logging(config: &LogConfig, honor_rust_log: bool) {
    let filter = build_filter(config, honor_rust_log);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if let Err(err) = result {
        tracing::debug!(error = %err, "logging already initialized");
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    // First 12 hex chars are plenty to tell runs apart.
    format!("run-{}", &uuid[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_ids_are_short_and_unique() {
        let a = generate_run_id();
        let b = generate_run_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), "run-".len() + 12);
        assert!(a[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn init_twice_is_harmless() {
        let config = LogConfig {
            timestamps: false,
            ..LogConfig::default()
        };
        init_logging(&config, false);
        init_logging(
            &LogConfig {
                format: LogFormat::Jsonl,
                ..config
            },
            false,
        );
        tracing::info!("still alive");
    }
}
