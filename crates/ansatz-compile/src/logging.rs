//! Tracing subscriber setup for applications embedding the compiler.
//!
//! The compiler itself only emits `tracing` events; it never installs a
//! subscriber. Call [`init_tracing`] once at program start to see them.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter for `config`, falling back to `RUST_LOG`, then `info`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global `fmt` subscriber configured by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = match config.format {
        LogFormat::Console => fmt::layer().with_target(true).compact().boxed(),
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
