//! Clock contract and host clock sources.
//!
//! The runtime never reads time on its own; the host supplies a monotonic
//! millisecond counter through [`Clock`]. Interrupt handlers must not call
//! into the runtime, so a hardware implementation only has to publish the
//! counter value.

use core::cell::Cell;

use critical_section::Mutex;

use crate::time::{Duration, Instant};

/// Monotonic millisecond counter supplied by the host platform.
///
/// The counter is unsigned 32-bit and wraps; the runtime compares deadlines
/// with wrap-safe arithmetic, so implementations just report the raw value.
pub trait Clock {
    /// Current counter value.
    fn now(&self) -> Instant;
}

/// A clock advanced by hand.
///
/// Used by tests, simulations and host demos to drive DELAY deterministically.
/// Safe to share as a `static`.
pub struct ManualClock {
    now: Mutex<Cell<u32>>,
}

impl ManualClock {
    /// Create a clock positioned at `start`.
    pub const fn new(start: Instant) -> Self {
        Self {
            now: Mutex::new(Cell::new(start.ticks())),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, to: Instant) {
        critical_section::with(|cs| self.now.borrow(cs).set(to.ticks()));
    }

    /// Advance the clock by `d`, wrapping.
    pub fn advance(&self, d: Duration) {
        critical_section::with(|cs| {
            let cell = self.now.borrow(cs);
            cell.set(cell.get().wrapping_add(d.as_millis()));
        });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        critical_section::with(|cs| Instant::from_ticks(self.now.borrow(cs).get()))
    }
}

/// Hosted clock backed by `std::time::Instant`.
///
/// Reports milliseconds since construction, truncated to the 32-bit counter
/// the routine contract expects.
#[cfg(feature = "std")]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start a clock at the current monotonic time.
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.start.elapsed().as_millis() as u32)
    }
}
