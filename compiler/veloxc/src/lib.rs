//! Velox command-line runner.
//!
//! Reads scripts from disk, resolves `include` relative to the including
//! script, and reports parse and run-time failures as diagnostics.

use std::sync::Once;

pub mod commands;
mod loader;

pub use loader::FileLoader;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=velox_eval=debug`
/// or `RUST_LOG=velox_eval=trace` to follow individual calls.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
