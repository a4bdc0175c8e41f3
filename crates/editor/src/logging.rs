// Chunk: docs/chunks/logging - Console logging setup
//!
//! Logging setup for the `markpad` binary.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! left to the binary.
//!
//! # Usage
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=markpad_search=debug` - window recomputations only
//! - `RUST_LOG=markpad_buffer=trace` - gap moves
//!
//! Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Level used when RUST_LOG is unset.
pub const DEFAULT_LEVEL: &str = "warn";

/// Builds the filter: RUST_LOG if set and valid, else `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Maps `-v` counts to a fallback level.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_LEVEL,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: u8) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter(level_for_verbosity(verbose)));

    if tracing_subscriber::registry().with(console_layer).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
