//! Producer/consumer pipeline under a simulated clock.
//!
//! A producer routine pushes a message through a 4-byte channel, one byte
//! per sweep with a configurable pause between bytes; a consumer routine
//! drains it and prints each completed line. The demo advances a manual
//! clock in fixed steps and narrates every dispatch, so the round-robin
//! interleaving and the delay handling are visible tick by tick.
//!
//! ```bash
//! cargo run -p pipeline-demo -- --message "Hi there" --delay-ms 30
//! ```

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use weave_core::{Clock, ManualClock};
use weave_rt::channel::ByteChannel;
use weave_rt::{
    await_ready, await_some, delay_to, finish, yield_now, Context, Duration, Instant, Routine,
    Scheduler, Status, Step, TraceEvent,
};

static PIPE: ByteChannel<4> = ByteChannel::new();

#[derive(Parser)]
#[command(name = "pipeline", about = "weave channel pipeline walkthrough")]
struct Args {
    /// Message the producer sends, newline-terminated
    #[arg(long, default_value = "Hello, weave")]
    message: String,

    /// Pause the producer takes between bytes
    #[arg(long, default_value_t = 20)]
    delay_ms: u32,

    /// Simulated milliseconds per scheduler sweep
    #[arg(long, default_value_t = 10)]
    tick_ms: u32,

    /// Give up after this many sweeps
    #[arg(long, default_value_t = 10_000)]
    max_sweeps: u32,

    /// Narrate every dispatch and idle tick
    #[arg(long)]
    trace: bool,
}

enum SendPhase {
    Emit,
    Rest,
}

struct Producer {
    message: Vec<u8>,
    sent: usize,
    pause: Duration,
    phase: SendPhase,
}

impl Routine for Producer {
    fn name(&self) -> &'static str {
        "producer"
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        loop {
            match self.phase {
                SendPhase::Emit => {
                    if self.sent == self.message.len() {
                        finish!();
                    }
                    await_ready!(PIPE.can_write());
                    PIPE.write(self.message[self.sent]);
                    self.sent += 1;
                    delay_to!(self.phase, SendPhase::Rest, self.pause);
                }
                SendPhase::Rest => {
                    self.phase = SendPhase::Emit;
                }
            }
        }
    }
}

struct Consumer {
    line: Vec<u8>,
    printed: Arc<Mutex<Vec<String>>>,
}

impl Routine for Consumer {
    fn name(&self) -> &'static str {
        "consumer"
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        let byte = await_some!(PIPE.read());
        if byte == b'\n' {
            let text = String::from_utf8_lossy(&self.line).into_owned();
            println!("{} {}", "recv:".bold(), text);
            self.printed.lock().unwrap().push(text);
            self.line.clear();
        } else {
            self.line.push(byte);
        }
        yield_now!();
    }
}

fn paint(status: Status) -> colored::ColoredString {
    let text = status.to_string();
    match status {
        Status::Yielding => text.green(),
        Status::Delaying => text.yellow(),
        Status::Awaiting => text.blue(),
        Status::Ending | Status::Ended => text.red(),
    }
}

fn narrate(event: TraceEvent<'_>) {
    match event {
        TraceEvent::Stepped { name, status } => {
            println!("  {} {name} -> {}", "step".dimmed(), paint(status));
        }
        TraceEvent::Idle => println!("  {}", "idle".dimmed()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let printed = Arc::new(Mutex::new(Vec::new()));
    let mut producer = Producer {
        message: format!("{}\n", args.message).into_bytes(),
        sent: 0,
        pause: Duration::from_millis(args.delay_ms),
        phase: SendPhase::Emit,
    };
    let mut consumer = Consumer {
        line: Vec::new(),
        printed: printed.clone(),
    };

    let clock = ManualClock::new(Instant::ZERO);
    let mut sched: Scheduler<'_, 4> = Scheduler::new();
    if args.trace {
        sched.set_trace_hook(narrate);
    }
    sched.register(&mut producer)?;
    sched.register(&mut consumer)?;

    let mut sweeps = 0;
    while sched.status_of("producer") != Some(Status::Ended) || PIPE.can_read() {
        sched.run_one(clock.now());
        clock.advance(Duration::from_millis(args.tick_ms));
        sweeps += 1;
        if sweeps >= args.max_sweeps {
            bail!("pipeline did not drain within {} sweeps", args.max_sweeps);
        }
    }
    // One more sweep lets the consumer print the terminating newline.
    sched.run_one(clock.now());

    println!(
        "{} {} byte(s) in {} sweep(s) at {}",
        "done:".bold().green(),
        producer_len(&printed),
        sweeps,
        clock.now()
    );
    Ok(())
}

fn producer_len(printed: &Arc<Mutex<Vec<String>>>) -> usize {
    printed.lock().unwrap().iter().map(|line| line.len() + 1).sum()
}
