//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the verbosity count picks the level.

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

// verbosity 0 = warn, 1 = info, 2 = debug, 3+ = trace
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn get_subscriber(verbosity: u8) -> impl Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(verbosity: u8) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    tracing::subscriber::set_global_default(get_subscriber(verbosity))
}
