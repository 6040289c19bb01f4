//! Tracing setup for relctl CLI
//!
//! Usage:
//!   relctl --debug ...              # Debug logging to stderr
//!   RUST_LOG=relctl_store=debug     # Fine-grained log control
//!
//! Log lines go to stderr so command output on stdout stays pipeable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
    /// Level used when neither RUST_LOG nor --debug is given
    pub default_level: Option<String>,
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let fallback = if config.debug {
        "debug".to_string()
    } else {
        config
            .default_level
            .clone()
            .unwrap_or_else(|| "info".to_string())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
