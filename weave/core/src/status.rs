//! Routine statuses and step verdicts.

use core::fmt;

use crate::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scheduling status of a routine.
///
/// The scheduler owns the status; a routine influences it only through the
/// [`Step`] verdict it returns from its body.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ready; stepped again on the next sweep
    Yielding,
    /// Suspended until the clock reaches the stored deadline
    Delaying,
    /// Ready; the body re-polls its predicate on each step
    Awaiting,
    /// Terminating; one more dispatch retires the routine
    Ending,
    /// Terminal; permanently skipped but still listed
    Ended,
}

impl Status {
    /// Whether the routine can still be stepped at some point.
    pub const fn is_alive(self) -> bool {
        !matches!(self, Status::Ended)
    }

    /// Whether the routine is runnable regardless of the clock.
    pub const fn is_immediately_ready(self) -> bool {
        matches!(self, Status::Yielding | Status::Awaiting | Status::Ending)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Yielding => write!(f, "Yielding"),
            Status::Delaying => write!(f, "Delaying"),
            Status::Awaiting => write!(f, "Awaiting"),
            Status::Ending => write!(f, "Ending"),
            Status::Ended => write!(f, "Ended"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Status::Yielding => defmt::write!(fmt, "Yielding"),
            Status::Delaying => defmt::write!(fmt, "Delaying"),
            Status::Awaiting => defmt::write!(fmt, "Awaiting"),
            Status::Ending => defmt::write!(fmt, "Ending"),
            Status::Ended => defmt::write!(fmt, "Ended"),
        }
    }
}

/// Verdict returned by one invocation of a routine body.
///
/// Each variant corresponds to one suspension primitive. The body saves its
/// own resume point before returning; the scheduler translates the verdict
/// into a [`Status`] and, for [`Step::Delay`], stamps the wake deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// YIELD: ready again on the next sweep
    Yield,
    /// AWAIT: the predicate was false; re-poll on the next step
    Await,
    /// DELAY: sleep for the given duration from now
    Delay(Duration),
    /// END: run down; the scheduler retires the routine
    Finish,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Yield => write!(f, "Yield"),
            Step::Await => write!(f, "Await"),
            Step::Delay(d) => write!(f, "Delay({d})"),
            Step::Finish => write!(f, "Finish"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Step {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Step::Yield => defmt::write!(fmt, "Yield"),
            Step::Await => defmt::write!(fmt, "Await"),
            Step::Delay(d) => defmt::write!(fmt, "Delay({})", d),
            Step::Finish => defmt::write!(fmt, "Finish"),
        }
    }
}
