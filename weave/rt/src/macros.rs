//! Suspension primitives.
//!
//! These macros are the only intended ways for a routine body to suspend.
//! Each expands to "save the resume label, return the verdict": the next
//! `step` re-enters the body, the outer `loop { match phase { .. } }`
//! dispatches to the saved phase, and execution falls through from there.
//!
//! The AWAIT forms leave the resume label untouched, so a false predicate is
//! re-polled on every subsequent step. Polling is cheap: the scheduler
//! dispatches every other ready routine between polls.

/// YIELD without moving the resume point; the same phase runs again on the
/// next sweep. For single-phase bodies.
#[macro_export]
macro_rules! yield_now {
    () => {
        return $crate::Step::Yield
    };
}

/// YIELD: store the next phase, then give up the processor until the next
/// round-robin sweep.
#[macro_export]
macro_rules! yield_to {
    ($place:expr, $next:expr) => {{
        $place = $next;
        return $crate::Step::Yield;
    }};
}

/// AWAIT: fall through once the predicate holds; otherwise suspend and
/// re-poll on the next step.
#[macro_export]
macro_rules! await_ready {
    ($cond:expr) => {
        if !$cond {
            return $crate::Step::Await;
        }
    };
}

/// AWAIT on an `Option`-producing source; evaluates to the contained value
/// once one is available.
///
/// The natural way to gate a channel read:
///
/// ```ignore
/// let byte = await_some!(rx.read());
/// ```
#[macro_export]
macro_rules! await_some {
    ($source:expr) => {
        match $source {
            ::core::option::Option::Some(value) => value,
            ::core::option::Option::None => return $crate::Step::Await,
        }
    };
}

/// DELAY without moving the resume point; the same phase runs again once
/// the deadline passes.
#[macro_export]
macro_rules! delay_for {
    ($dur:expr) => {
        return $crate::Step::Delay($dur)
    };
}

/// DELAY: store the next phase, then sleep for the given [`Duration`].
/// The scheduler stamps `deadline = now + dur` and will not step the
/// routine again until the clock reaches it, wrap-safely.
///
/// [`Duration`]: weave_core::Duration
#[macro_export]
macro_rules! delay_to {
    ($place:expr, $next:expr, $dur:expr) => {{
        $place = $next;
        return $crate::Step::Delay($dur);
    }};
}

/// END: terminate the routine. The scheduler moves it to `Ending`, retires
/// it to `Ended` on the next dispatch, and never re-enters the body.
#[macro_export]
macro_rules! finish {
    () => {
        return $crate::Step::Finish
    };
}
