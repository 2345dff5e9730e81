//! Opt-in tracing subscriber for hosts that do not install their own

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `EnvFilter` directive
pub const LOG_ENV: &str = "APPSTREAM_LOG";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber filtered by `APPSTREAM_LOG` (default `warn`).
/// Calling this more than once does nothing.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        // Another subscriber may already be set by the host
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
