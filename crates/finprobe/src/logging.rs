//! Tracing setup for suite binaries and tests.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. Reads `RUST_LOG`, defaulting to `info`
/// for this crate. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("finprobe=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// JSON-formatted variant for CI log collection
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("finprobe=info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
