//! Tracing setup for the figpress binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `figpress=trace`.
pub const LOG_ENV: &str = "FIGPRESS_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "figpress=debug,info" } else { "warn" }
}

/// Initializes a stderr subscriber. `FIGPRESS_LOG` wins over `verbose`.
/// Calling it twice is harmless.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
