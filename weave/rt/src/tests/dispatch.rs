use std::format;
use std::string::String;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::vec::Vec;

use core::cell::RefCell;

use critical_section::Mutex;

use weave_core::{Error, Instant, Status};

use super::{Quitter, StepLog, Waiter, Yielder};
use crate::scheduler::Scheduler;
use crate::trace::TraceEvent;

const T0: Instant = Instant::ZERO;

#[test]
fn round_robin_in_insertion_order() {
    let log = StepLog::default();
    let mut a = Yielder::new("A", &log);
    let mut b = Yielder::new("B", &log);

    let mut sched: Scheduler<'_, 4> = Scheduler::new();
    sched.register(&mut a).unwrap();
    sched.register(&mut b).unwrap();

    assert_eq!(sched.status_of("A"), Some(Status::Yielding));
    assert_eq!(sched.status_of("B"), Some(Status::Yielding));

    for _ in 0..6 {
        assert!(sched.run_one(T0));
    }

    assert_eq!(log.joined(), "A,B,A,B,A,B");
    assert_eq!(sched.steps_of("A"), Some(3));
    assert_eq!(sched.steps_of("B"), Some(3));
}

#[test]
fn empty_scheduler_idles() {
    let mut sched: Scheduler<'_, 4> = Scheduler::new();
    assert!(sched.is_empty());
    assert!(!sched.run_one(T0));
}

#[test]
fn registration_beyond_capacity_is_rejected() {
    let log = StepLog::default();
    let mut a = Yielder::new("A", &log);
    let mut b = Yielder::new("B", &log);
    let mut c = Yielder::new("C", &log);

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.register(&mut a).unwrap();
    sched.register(&mut b).unwrap();
    assert_eq!(sched.register(&mut c), Err(Error::RegistryFull));
    assert_eq!(sched.len(), 2);
}

#[test]
fn await_polls_until_predicate_holds() {
    let log = StepLog::default();
    let ready = Arc::new(AtomicBool::new(false));
    let mut waiter = Waiter {
        ready: ready.clone(),
        log: log.clone(),
    };

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.register(&mut waiter).unwrap();

    for _ in 0..10 {
        assert!(sched.run_one(T0));
    }
    assert_eq!(log.len(), 0);
    assert_eq!(sched.status_of("waiter"), Some(Status::Awaiting));
    assert_eq!(sched.steps_of("waiter"), Some(10));

    // The step that observes the predicate falls through exactly once.
    ready.store(true, Ordering::Relaxed);
    assert!(sched.run_one(T0));
    assert_eq!(log.joined(), "go");
    assert_eq!(sched.status_of("waiter"), Some(Status::Ending));

    // Retirement runs the tail cleanup once and does not count as a step.
    assert!(sched.run_one(T0));
    assert_eq!(log.joined(), "go,retired");
    assert_eq!(sched.status_of("waiter"), Some(Status::Ended));
    assert_eq!(sched.steps_of("waiter"), Some(11));

    for _ in 0..5 {
        assert!(!sched.run_one(T0));
    }
    assert_eq!(log.joined(), "go,retired");
}

#[test]
fn ended_routine_is_never_stepped_again() {
    let log = StepLog::default();
    let mut x = Yielder::new("X", &log);
    let mut y = Quitter {
        name: "Y",
        invocations: 0,
        log: log.clone(),
    };
    let mut z = Yielder::new("Z", &log);

    let mut sched: Scheduler<'_, 4> = Scheduler::new();
    sched.register(&mut x).unwrap();
    sched.register(&mut y).unwrap();
    sched.register(&mut z).unwrap();

    for _ in 0..40 {
        sched.run_one(T0);
    }

    assert_eq!(sched.status_of("Y"), Some(Status::Ended));
    assert_eq!(sched.steps_of("Y"), Some(3));

    // After Y retires, the ring is X and Z alone.
    let tail: String = log.joined().chars().skip(20).collect();
    assert!(!tail.contains('Y'), "retired routine stepped: {tail}");
    assert!(sched.steps_of("X").unwrap() > 10);
    assert!(sched.steps_of("Z").unwrap() > 10);
}

#[test]
fn snapshot_lists_every_routine_in_ring_order() {
    let log = StepLog::default();
    let mut a = Yielder::new("A", &log);
    let mut b = Yielder::new("B", &log);

    let mut sched: Scheduler<'_, 4> = Scheduler::new();
    sched.register(&mut a).unwrap();
    sched.register(&mut b).unwrap();
    sched.run_one(T0);

    let names: Vec<&str> = sched.routines().map(|info| info.name).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(sched.status_of("missing"), None);
}

static TRACE_LOG: Mutex<RefCell<Vec<String>>> = Mutex::new(RefCell::new(Vec::new()));

fn record_trace(event: TraceEvent<'_>) {
    let line = match event {
        TraceEvent::Stepped { name, status } => format!("{name}:{status}"),
        TraceEvent::Idle => String::from("idle"),
    };
    critical_section::with(|cs| TRACE_LOG.borrow_ref_mut(cs).push(line));
}

#[test]
fn trace_hook_sees_dispatches() {
    let log = StepLog::default();
    let mut a = Yielder::new("A", &log);

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.set_trace_hook(record_trace);
    sched.register(&mut a).unwrap();

    sched.run_one(T0);

    let lines = critical_section::with(|cs| TRACE_LOG.borrow_ref(cs).clone());
    assert_eq!(lines, ["A:Yielding"]);
}
