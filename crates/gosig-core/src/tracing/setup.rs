//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "GOSIG_LOG";

/// Initialize the gosig tracing/logging system.
///
/// Reads `GOSIG_LOG` for per-module log levels, e.g.
/// `GOSIG_LOG=gosig_analysis::resolver=debug,gosig=info`.
/// Falls back to `gosig=info` if `GOSIG_LOG` is not set or is invalid.
///
/// Output goes to stderr so it never mixes with report files or stdout.
/// This function is idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("gosig=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
