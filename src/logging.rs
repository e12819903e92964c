//! Structured logging setup for the binaries.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! binary installs a subscriber here.

use anyhow::{Result, anyhow};
use std::io;
use tracing_subscriber::EnvFilter;

/// Crate-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "SHELLMETA_LOG";

/// Filter directive for a `-v` count when no environment filter is set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr fmt subscriber. Fails if one is already installed.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
