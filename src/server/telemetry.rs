//! Logging setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVES: &str = "stash=info,tower_http=debug";

/// Install a formatting subscriber filtered by `RUST_LOG`
///
/// Falls back to `default_directives` when `RUST_LOG` is unset or invalid.
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing(default_directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
