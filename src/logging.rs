//! Log subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; hosts embedding the plugin bring
//! their own subscriber. The bundled CLI installs a compact fmt layer writing
//! to stderr, so rendered HTML on stdout can be piped untouched.
//!
//! `RUST_LOG` wins when set; otherwise the level follows `-v` flags.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "photo_gallery=info",
        1 => "photo_gallery=debug",
        _ => "debug",
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
}
