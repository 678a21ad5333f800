//! Bounded-wait helpers.
//!
//! No automatic retry exists anywhere in this suite; flakiness is mitigated
//! only by bounded waits before assertions. The timeouts below are the
//! tuned values for the target application.

use crate::result::{SuiteError, SuiteResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Post-login/post-navigation settling bound: user-menu visibility
pub const USER_MENU_TIMEOUT_MS: u64 = 10_000;

/// Asynchronously-populated option lists settle within this bound
pub const OPTION_LIST_TIMEOUT_MS: u64 = 10_000;

/// Quick probe for "is a user already logged in"
pub const LOGIN_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Options for a bounded wait
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout in milliseconds
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a `Duration`
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a `Duration`
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll an async predicate until it reports true or the bound elapses.
///
/// Predicate errors abort the wait immediately; they are not retried.
pub async fn poll_until<F, Fut>(options: &WaitOptions, mut check: F) -> SuiteResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<bool>>,
{
    let deadline = Instant::now() + options.timeout();
    loop {
        if check().await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SuiteError::Timeout {
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}
