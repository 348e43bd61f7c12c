//! Dispatch tracing.
//!
//! A scheduler can report every dispatch and idle tick through a hook.
//! The hook is a plain `fn` pointer so it costs one word and works without
//! allocation; a host build typically prints, an embedded build forwards to
//! its logging transport.

use weave_core::Status;

/// One scheduler occurrence.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// A routine was dispatched; `status` is its state after the step.
    Stepped { name: &'a str, status: Status },
    /// A sweep found nothing ready.
    Idle,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TraceEvent<'_> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TraceEvent::Stepped { name, status } => {
                defmt::write!(fmt, "step {} -> {}", name, status)
            }
            TraceEvent::Idle => defmt::write!(fmt, "idle"),
        }
    }
}

/// Receives every [`TraceEvent`] of the scheduler it is installed on.
pub type TraceHook = fn(TraceEvent<'_>);
