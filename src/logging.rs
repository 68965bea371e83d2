//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! Diagnostics go to stderr so they never mix with check results on stdout.
//! The `FIELDRULES_LOG` environment variable takes precedence over the
//! verbosity flag, e.g. `FIELDRULES_LOG=fieldrules::engine=trace`.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "FIELDRULES_LOG";

static INIT: Once = Once::new();

/// Default filter directive for a `-v` count
///
/// - 0: warnings and errors
/// - 1 (`-v`): info
/// - 2 (`-vv`): debug, one event per validated value
/// - 3+ (`-vvv`): trace, one event per rule evaluation
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fieldrules=warn",
        1 => "fieldrules=info",
        2 => "fieldrules=debug",
        _ => "fieldrules=trace",
    }
}

/// Install the global subscriber
///
/// Calling this more than once is harmless; only the first call has effect.
pub fn init_logging(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let result = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            )
            .with(filter)
            .try_init();

        if let Err(e) = result {
            eprintln!("Warning: failed to initialise logging: {}", e);
        }
    });
}
