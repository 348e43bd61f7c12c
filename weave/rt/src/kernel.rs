//! The process-wide scheduler singleton.
//!
//! Embedded applications register their routines once at startup and then
//! call [`loop_once`] forever from the host's main loop. The singleton is
//! init-once, run-forever; there is no teardown path. Hosted code that
//! wants several independent schedulers uses
//! [`Scheduler`](crate::scheduler::Scheduler) instances directly.

use core::cell::RefCell;

use critical_section::Mutex;

use weave_core::{Clock, Error, Result};

use crate::routine::Routine;
use crate::scheduler::{RoutineInfo, Scheduler};
use crate::trace::TraceHook;

/// Capacity of the singleton's routine table.
pub const MAX_ROUTINES: usize = 16;

struct KernelState {
    sched: Scheduler<'static, MAX_ROUTINES>,
    clock: Option<&'static (dyn Clock + Sync)>,
}

/// Scheduler singleton plus its installed clock.
pub struct Kernel {
    state: Mutex<RefCell<KernelState>>,
}

impl Kernel {
    const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(KernelState {
                sched: Scheduler::new(),
                clock: None,
            })),
        }
    }

    /// One-time initialization: install the host clock.
    ///
    /// Must run before the first [`loop_once`](Kernel::loop_once); routines
    /// may be registered before or after.
    pub fn setup(&self, clock: &'static (dyn Clock + Sync)) {
        critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).clock = Some(clock);
        });
    }

    /// Add a routine to the dispatch ring.
    pub fn register(&self, routine: &'static mut dyn Routine) -> Result<()> {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).sched.register(routine))
    }

    /// Perform one dispatch step; intended to be called repeatedly from the
    /// host's main loop. Returns whether a routine was stepped.
    pub fn loop_once(&self) -> Result<bool> {
        let clock =
            critical_section::with(|cs| self.state.borrow_ref(cs).clock).ok_or(Error::NoClock)?;
        let now = clock.now();
        Ok(critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).sched.run_one(now)
        }))
    }

    /// Install a dispatch trace hook.
    pub fn set_trace_hook(&self, hook: TraceHook) {
        critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).sched.set_trace_hook(hook);
        });
    }

    /// Visit a diagnostic snapshot of every registered routine.
    pub fn for_each_routine<F>(&self, mut f: F)
    where
        F: FnMut(RoutineInfo),
    {
        critical_section::with(|cs| {
            for info in self.state.borrow_ref(cs).sched.routines() {
                f(info);
            }
        });
    }

    /// Number of registered routines.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).sched.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Global kernel instance.
static KERNEL: Kernel = Kernel::new();

/// Get the global kernel.
pub fn kernel() -> &'static Kernel {
    &KERNEL
}

/// Install the host clock on the global kernel.
pub fn setup(clock: &'static (dyn Clock + Sync)) {
    kernel().setup(clock)
}

/// Register a routine with the global kernel.
pub fn register(routine: &'static mut dyn Routine) -> Result<()> {
    kernel().register(routine)
}

/// One dispatch step of the global kernel.
pub fn loop_once() -> Result<bool> {
    kernel().loop_once()
}
