//! Round-robin dispatch over a fixed routine table.

use heapless::Vec;

use weave_core::{Error, Instant, Result, Status, Step};

use crate::routine::{Context, Routine};
use crate::trace::{TraceEvent, TraceHook};

/// One registered routine plus its scheduling record.
struct Slot<'a> {
    routine: &'a mut (dyn Routine + 'a),
    status: Status,
    /// Wake deadline; read only while `status` is `Delaying`.
    deadline: Instant,
    steps: u32,
}

/// Diagnostic snapshot of one routine.
#[derive(Debug, Clone, Copy)]
pub struct RoutineInfo {
    pub name: &'static str,
    pub status: Status,
    /// Completed body invocations. The `Ending -> Ended` retirement does not
    /// re-enter the body and is not counted.
    pub steps: u32,
}

#[cfg(feature = "defmt")]
impl defmt::Format for RoutineInfo {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}: {} ({} steps)", self.name, self.status, self.steps);
    }
}

/// Cooperative scheduler over at most `N` routines.
///
/// Routines are held in insertion order and dispatched strict round-robin:
/// between two successive steps of the same routine, every other ready
/// routine gets exactly one step. Retired routines keep their position; the
/// table is never compacted.
///
/// The scheduler does not own a clock; each [`run_one`](Scheduler::run_one)
/// call takes the current counter reading. The process-wide singleton in
/// [`kernel`](crate::kernel) wraps this type with an installed clock.
pub struct Scheduler<'a, const N: usize> {
    slots: Vec<Slot<'a>, N>,
    cursor: usize,
    trace: Option<TraceHook>,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    /// Create an empty scheduler.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
            trace: None,
        }
    }

    /// Add a routine to the end of the dispatch ring.
    ///
    /// The routine starts `Yielding`, so its first step enters the body.
    /// Registration is expected at startup; there is no unregister.
    pub fn register(&mut self, routine: &'a mut (dyn Routine + 'a)) -> Result<()> {
        self.slots
            .push(Slot {
                routine,
                status: Status::Yielding,
                deadline: Instant::ZERO,
                steps: 0,
            })
            .map_err(|_| Error::RegistryFull)
    }

    /// Install a hook receiving one record per dispatch or idle tick.
    pub fn set_trace_hook(&mut self, hook: TraceHook) {
        self.trace = Some(hook);
    }

    /// Number of registered routines, retired ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Perform one dispatch: scan forward from the cursor for a ready
    /// routine, step it, and advance the cursor past it.
    ///
    /// Returns `false` for an idle tick (nothing ready; the cursor still
    /// advances by one so idle time is spread over the ring).
    pub fn run_one(&mut self, now: Instant) -> bool {
        let n = self.slots.len();
        if n == 0 {
            self.emit(TraceEvent::Idle);
            return false;
        }

        for offset in 0..n {
            let idx = (self.cursor + offset) % n;
            if Self::is_ready(&self.slots[idx], now) {
                self.dispatch(idx, now);
                self.cursor = (idx + 1) % n;
                return true;
            }
        }

        self.cursor = (self.cursor + 1) % n;
        self.emit(TraceEvent::Idle);
        false
    }

    /// Snapshot every routine in ring order.
    pub fn routines(&self) -> impl Iterator<Item = RoutineInfo> + use<'_, 'a, N> {
        self.slots.iter().map(|slot| RoutineInfo {
            name: slot.routine.name(),
            status: slot.status,
            steps: slot.steps,
        })
    }

    /// Status of the named routine, if registered.
    pub fn status_of(&self, name: &str) -> Option<Status> {
        self.find(name).map(|slot| slot.status)
    }

    /// Step count of the named routine, if registered.
    pub fn steps_of(&self, name: &str) -> Option<u32> {
        self.find(name).map(|slot| slot.steps)
    }

    fn find(&self, name: &str) -> Option<&Slot<'a>> {
        self.slots.iter().find(|slot| slot.routine.name() == name)
    }

    fn is_ready(slot: &Slot<'_>, now: Instant) -> bool {
        slot.status.is_immediately_ready()
            || (slot.status == Status::Delaying && slot.deadline.is_reached_by(now))
    }

    fn dispatch(&mut self, idx: usize, now: Instant) {
        let slot = &mut self.slots[idx];

        if slot.status == Status::Ending {
            // Tail cleanup only; the body is not re-entered.
            slot.routine.on_retire();
            slot.status = Status::Ended;
        } else {
            slot.steps = slot.steps.wrapping_add(1);
            let mut cx = Context::new(now);
            match slot.routine.step(&mut cx) {
                Step::Yield => slot.status = Status::Yielding,
                Step::Await => slot.status = Status::Awaiting,
                Step::Delay(d) => {
                    slot.status = Status::Delaying;
                    slot.deadline = now.after(d);
                }
                Step::Finish => slot.status = Status::Ending,
            }
        }

        let record = TraceEvent::Stepped {
            name: slot.routine.name(),
            status: slot.status,
        };
        self.emit(record);
    }

    fn emit(&self, event: TraceEvent<'_>) {
        if let Some(hook) = self.trace {
            hook(event);
        }
    }
}

impl<'a, const N: usize> Default for Scheduler<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}
