use weave_core::{Clock, Duration, Instant, ManualClock, Status};

use super::{StepLog, Ticker};
use crate::scheduler::Scheduler;

fn ticker(period_ms: u32, log: &StepLog) -> Ticker {
    Ticker {
        period: Duration::from_millis(period_ms),
        log: log.clone(),
    }
}

#[test]
fn delay_elapses_with_the_clock() {
    let clock = ManualClock::new(Instant::ZERO);
    let log = StepLog::default();
    let mut t = ticker(100, &log);

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.register(&mut t).unwrap();

    for _ in 0..5 {
        sched.run_one(clock.now());
        clock.advance(Duration::from_millis(100));
    }
    assert_eq!(log.joined(), "tick,tick,tick,tick,tick");
}

#[test]
fn delay_is_not_stepped_early() {
    let clock = ManualClock::new(Instant::ZERO);
    let log = StepLog::default();
    let mut t = ticker(100, &log);

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.register(&mut t).unwrap();

    // Advancing 50ms per call only fires on every other call.
    for _ in 0..5 {
        sched.run_one(clock.now());
        clock.advance(Duration::from_millis(50));
    }
    assert_eq!(log.joined(), "tick,tick,tick");
    assert_eq!(sched.status_of("ticker"), Some(Status::Delaying));
}

#[test]
fn undue_delay_is_an_idle_tick() {
    let clock = ManualClock::new(Instant::ZERO);
    let log = StepLog::default();
    let mut t = ticker(100, &log);

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.register(&mut t).unwrap();

    assert!(sched.run_one(clock.now()));
    assert!(!sched.run_one(clock.now()));
    assert!(!sched.run_one(clock.now()));
    assert_eq!(log.len(), 1);
}

#[test]
fn delay_survives_counter_wraparound() {
    // DELAY(10) issued at clock 2^32 - 5 must resume at (virtual) clock 5.
    let clock = ManualClock::new(Instant::from_ticks(u32::MAX - 4));
    let log = StepLog::default();
    let mut t = ticker(10, &log);

    let mut sched: Scheduler<'_, 2> = Scheduler::new();
    sched.register(&mut t).unwrap();

    assert!(sched.run_one(clock.now()));
    assert_eq!(log.len(), 1);

    clock.advance(Duration::from_millis(4)); // u32::MAX
    assert!(!sched.run_one(clock.now()));
    clock.advance(Duration::from_millis(5)); // wrapped to 4
    assert!(!sched.run_one(clock.now()));
    clock.advance(Duration::from_millis(1)); // 5: deadline reached
    assert!(sched.run_one(clock.now()));
    assert_eq!(log.len(), 2);
}
