//! Logging setup for the CLI.
//!
//! Events go to stderr so `--json` output on stdout stays machine-readable.
//! `RUST_LOG` overrides the default level (e.g. `RUST_LOG=calc_core=debug`).

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter: advisories and overflow warnings only
const DEFAULT_FILTER: &str = "warn";

pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("calc_core=debug,calc_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(false)
        .init();
}
