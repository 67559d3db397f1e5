//! Tracing subscriber set-up for embedders that do not install their own.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::FormsConfig;

/// Install a global subscriber. `RUST_LOG` wins over `level` when set.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: &str, json: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    }
}

/// [`init_tracing`] with the level and format from `config`.
pub fn init_from_config(config: &FormsConfig) -> Result<(), TryInitError> {
    init_tracing(&config.log_level, config.json_logs)
}
