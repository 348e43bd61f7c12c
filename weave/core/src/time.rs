//! Millisecond time arithmetic.
//!
//! The host clock is an unsigned 32-bit millisecond counter that wraps
//! roughly every 49.7 days. All deadline comparisons go through
//! [`Instant::is_reached_by`], a signed difference that stays correct
//! across the wrap.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the host's millisecond counter.
///
/// Instants are opaque counter values, not calendar time; they wrap. The
/// only meaningful operations are offsetting by a [`Duration`] and the
/// wrap-safe ordering tests below.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Instant(u32);

impl Instant {
    /// Counter zero; a convenient epoch for tests and simulations.
    pub const ZERO: Self = Self(0);

    /// Create an instant from a raw counter value.
    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Raw counter value.
    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// The instant `d` milliseconds after `self`, wrapping.
    pub const fn after(self, d: Duration) -> Self {
        Self(self.0.wrapping_add(d.as_millis()))
    }

    /// Wrap-safe deadline test: has `now` reached `self`?
    ///
    /// Computed as `(now - self) as i32 >= 0`, so a deadline stamped just
    /// before the counter wraps is still reachable just after it.
    pub const fn is_reached_by(self, now: Instant) -> bool {
        now.0.wrapping_sub(self.0) as i32 >= 0
    }

    /// Milliseconds elapsed from `earlier` to `self`, wrapping.
    pub const fn since(self, earlier: Instant) -> Duration {
        Duration::from_millis(self.0.wrapping_sub(earlier.0))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Instant {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "t+{}ms", self.0);
    }
}

/// A span of milliseconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    millis: u32,
}

impl Duration {
    /// Zero-length span.
    pub const ZERO: Self = Self { millis: 0 };

    /// Create a duration from milliseconds.
    pub const fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Create a duration from whole seconds.
    pub const fn from_secs(secs: u32) -> Self {
        Self {
            millis: secs * 1000,
        }
    }

    /// The span in milliseconds.
    pub const fn as_millis(self) -> u32 {
        self.millis
    }

    /// Whether the span is empty.
    pub const fn is_zero(self) -> bool {
        self.millis == 0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Duration {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ms", self.millis);
    }
}

/// Compile-time duration literals.
///
/// ```
/// use weave_core::duration;
///
/// let blink = duration!(100 ms);
/// let idle = duration!(2 s);
/// ```
#[macro_export]
macro_rules! duration {
    ($value:literal ms) => {
        $crate::Duration::from_millis($value)
    };
    ($value:literal s) => {
        $crate::Duration::from_secs($value)
    };
}
