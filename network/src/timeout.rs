//! Service-loop timeout context.
//!
//! A timeout is just another termination predicate: it returns 0 while
//! time remains and the negative timeout code once it has elapsed, so
//! callers can compose it with "got the reply I wanted" predicates.

use ember_core::time::{self, Clock};
use ember_core::Error;

/// Elapsed-time check against a monotonic millisecond tick.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutContext {
    pub start_ms: u64,
    /// Negative disables the timeout entirely (infinite wait,
    /// cancellable only by another predicate).
    pub timeout_ms: i64,
}

impl TimeoutContext {
    pub fn new(start_ms: u64, timeout_ms: i64) -> Self {
        Self {
            start_ms,
            timeout_ms,
        }
    }

    /// Start counting from the process-wide clock's current tick.
    pub fn begin(timeout_ms: i64) -> Self {
        Self::new(time::now_ms(), timeout_ms)
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        if self.timeout_ms < 0 {
            return false;
        }
        now_ms.wrapping_sub(self.start_ms) >= self.timeout_ms as u64
    }

    /// Termination-predicate form: 0 to keep looping, the negative
    /// timeout code once expired.
    pub fn check(&self, now_ms: u64) -> i32 {
        if self.expired(now_ms) {
            Error::Timeout.code()
        } else {
            0
        }
    }

    /// Predicate closure bound to a clock, for passing straight to
    /// [`crate::service`].
    pub fn predicate<'a>(&'a self, clock: &'a dyn Clock) -> impl FnMut() -> i32 + 'a {
        move || self.check(clock.now_ms())
    }
}
