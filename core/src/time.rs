//! Monotonic time and bounded waits.
//!
//! Boards supply a millisecond tick source at start-of-day. Everything
//! that waits on hardware does so through [`wait_for`], which bounds the
//! spin with an explicit timeout instead of hanging on a status bit that
//! never sets.

use core::sync::atomic::{AtomicU64, Ordering};

use spin::Once;

use crate::error::{Error, Result};

/// Monotonic millisecond tick source.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

static CLOCK: Once<&'static dyn Clock> = Once::new();

/// Install the process-wide clock. The first install wins.
pub fn set_clock(clock: &'static dyn Clock) {
    CLOCK.call_once(|| clock);
}

/// Current tick, 0 until a clock is installed.
pub fn now_ms() -> u64 {
    CLOCK.get().map(|c| c.now_ms()).unwrap_or(0)
}

/// Spin on `cond` until it holds or `timeout_ms` elapses on `clock`.
///
/// This is the bounded form of a hardware-status busy-wait: the caller
/// gets `Error::Timeout` back instead of a hang when the bit never
/// sets.
pub fn wait_for(
    clock: &dyn Clock,
    timeout_ms: u64,
    mut cond: impl FnMut() -> bool,
) -> Result<()> {
    let start = clock.now_ms();
    loop {
        if cond() {
            return Ok(());
        }
        if clock.now_ms().wrapping_sub(start) >= timeout_ms {
            return Err(Error::Timeout);
        }
        core::hint::spin_loop();
    }
}

/// Hand-advanced clock for tests and bring-up.
pub struct ManualClock {
    ms: AtomicU64,
}

impl ManualClock {
    pub const fn new() -> Self {
        Self {
            ms: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicU32;

    #[test]
    fn test_wait_for_immediate_success() {
        let clock = ManualClock::new();
        assert!(wait_for(&clock, 10, || true).is_ok());
    }

    #[test]
    fn test_wait_for_condition_becomes_true() {
        let clock = ManualClock::new();
        let calls = AtomicU32::new(0);
        let result = wait_for(&clock, 100, || {
            clock.advance(1);
            calls.fetch_add(1, Ordering::SeqCst) >= 5
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_wait_for_times_out() {
        let clock = ManualClock::new();
        let result = wait_for(&clock, 50, || {
            clock.advance(10);
            false
        });
        assert_eq!(result, Err(Error::Timeout));
    }

    #[test]
    fn test_wait_for_zero_timeout_checks_once() {
        let clock = ManualClock::new();
        assert!(wait_for(&clock, 0, || true).is_ok());
        assert_eq!(wait_for(&clock, 0, || false), Err(Error::Timeout));
    }
}
