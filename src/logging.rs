//! Logging initialization
//!
//! Diagnostics go to stderr through tracing so stdout stays clean for
//! the reports. `RUST_LOG` overrides the default filter.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
