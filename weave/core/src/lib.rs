#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # weave-core
//!
//! Vocabulary types for the weave cooperative routine runtime: routine
//! statuses and step verdicts, wrap-safe millisecond time arithmetic, and
//! the clock contract supplied by the host platform.
//!
//! The crate is `no_std` by default; the `std` feature adds a hosted clock
//! and `std::error::Error` impls.

use core::fmt;

pub mod clock;
pub mod status;
pub mod time;

pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use status::{Status, Step};
pub use time::{Duration, Instant};

/// Runtime version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the weave runtime.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for runtime operations.
///
/// The surface is deliberately tiny: the runtime never panics or aborts in
/// library code, and the remaining failure modes (channel overflow, missing
/// suspension in a loop body) are reported as values or documented as
/// cooperative contract violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The scheduler's routine table is at capacity
    RegistryFull,
    /// The kernel was stepped before a clock was installed
    NoClock,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RegistryFull => write!(f, "routine table is full"),
            Error::NoClock => write!(f, "no clock installed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::RegistryFull => defmt::write!(fmt, "RegistryFull"),
            Error::NoClock => defmt::write!(fmt, "NoClock"),
        }
    }
}
