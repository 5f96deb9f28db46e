//! Logging bootstrap for the CLI.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging. `RUST_LOG` wins over the verbosity flags.
pub fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
