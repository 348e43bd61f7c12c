//! The resumable-routine abstraction.

use weave_core::{Instant, Step};

/// A cooperative task stepped by the scheduler.
///
/// Routines are polymorphic over a single capability: [`step`](Routine::step)
/// advances the body until the next suspension point and reports how it
/// suspended. A step runs in bounded time proportional to the user code
/// between two suspension points; the runtime allocates nothing.
///
/// The resume point is ordinary data owned by the implementing struct, so a
/// routine occupies tens of bytes regardless of how deep its body nests. The
/// cost paid is that locals do not survive suspension; durable state must be
/// a field.
///
/// A body that never suspends monopolizes the processor until it returns.
/// That is the cooperative contract, not a runtime-detectable error.
pub trait Routine: Send {
    /// Stable identifier for diagnostics.
    fn name(&self) -> &'static str;

    /// Run the body from its saved resume point to the next suspension
    /// point or to completion, returning the suspension verdict.
    fn step(&mut self, cx: &mut Context) -> Step;

    /// Tail cleanup, run once when the scheduler retires the routine
    /// (`Ending` to `Ended`). The body is not re-entered after it.
    fn on_retire(&mut self) {}
}

/// Per-step context handed to routine bodies.
///
/// Carries the clock reading the scheduler dispatched with, so bodies can
/// timestamp without talking to the clock source directly.
pub struct Context {
    now: Instant,
}

impl Context {
    pub(crate) fn new(now: Instant) -> Self {
        Self { now }
    }

    /// Clock value at dispatch time.
    pub fn now(&self) -> Instant {
        self.now
    }
}
