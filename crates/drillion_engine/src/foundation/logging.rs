//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with explicit filter directives (e.g. `"info"` or
/// `"drillion_engine::physics=trace"`). `RUST_LOG` still takes precedence.
///
/// Returns `false` if a logger was already installed, which happens when
/// several tests initialise logging in the same process.
pub fn init_with_filters(filters: &str) -> bool {
    env_logger::Builder::new()
        .parse_filters(filters)
        .parse_default_env()
        .try_init()
        .is_ok()
}
