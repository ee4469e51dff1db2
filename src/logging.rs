//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with command output on stdout.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "expense_ledger=warn",
        1 => "expense_ledger=info",
        _ => "expense_ledger=debug",
    }
}

/// Install the global subscriber once
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
