//! Scheduler property tests.
//!
//! The routine doubles here collect observations into shared vectors so the
//! tests can assert on dispatch order without touching real I/O.

use std::string::String;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use weave_core::{Duration, Step};

use crate::routine::{Context, Routine};
use crate::{await_ready, delay_for, finish, yield_now};

mod delay;
mod dispatch;

#[derive(Clone, Default)]
struct StepLog {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl StepLog {
    fn push(&self, entry: &'static str) {
        self.entries.lock().unwrap().push(entry);
    }

    fn joined(&self) -> String {
        self.entries.lock().unwrap().join(",")
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Logs its name and yields, forever.
struct Yielder {
    name: &'static str,
    log: StepLog,
}

impl Yielder {
    fn new(name: &'static str, log: &StepLog) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }
}

impl Routine for Yielder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        self.log.push(self.name);
        yield_now!();
    }
}

/// Logs a tick and sleeps for a fixed period.
struct Ticker {
    period: Duration,
    log: StepLog,
}

impl Routine for Ticker {
    fn name(&self) -> &'static str {
        "ticker"
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        self.log.push("tick");
        delay_for!(self.period);
    }
}

/// Blocks on a flag, logs once, then terminates.
struct Waiter {
    ready: Arc<AtomicBool>,
    log: StepLog,
}

impl Routine for Waiter {
    fn name(&self) -> &'static str {
        "waiter"
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        await_ready!(self.ready.load(Ordering::Relaxed));
        self.log.push("go");
        finish!();
    }

    fn on_retire(&mut self) {
        self.log.push("retired");
    }
}

/// Yields twice, then ends on its third step.
struct Quitter {
    name: &'static str,
    invocations: u32,
    log: StepLog,
}

impl Routine for Quitter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        self.invocations += 1;
        self.log.push(self.name);
        if self.invocations == 3 {
            finish!();
        }
        yield_now!();
    }
}
