#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # weave-rt
//!
//! A cooperative multitasking runtime for single-threaded targets with
//! kilobytes of RAM: no preemption, no per-routine stacks, no allocation
//! after startup.
//!
//! ## Module overview
//! - [`routine`]   – the resumable-routine abstraction (`step() -> Step`).
//! - [`macros`]    – suspension primitives that expand inside routine bodies.
//! - [`scheduler`] – round-robin dispatch over a fixed routine table.
//! - [`channel`]   – bounded SPSC ring, the canonical inter-routine
//!   synchronization primitive.
//! - [`kernel`]    – the process-wide scheduler singleton and its free-function
//!   facade (`setup`, `register`, `loop_once`).
//! - [`trace`]     – optional dispatch/idle records through a hook.
//!
//! ## Writing a routine
//!
//! A routine is a struct that owns all state that must survive suspension,
//! including its resume point (typically a small phase enum). The body is a
//! `loop` over a `match` on the phase; the suspension macros save the next
//! phase and return in one step:
//!
//! ```
//! use weave_rt::{await_ready, finish, yield_to, Context, Routine, Step};
//! use weave_rt::channel::ByteChannel;
//!
//! static TX: ByteChannel<4> = ByteChannel::new();
//!
//! enum Phase { Send }
//!
//! struct Greeter {
//!     phase: Phase,
//!     at: usize,
//! }
//!
//! impl Routine for Greeter {
//!     fn name(&self) -> &'static str {
//!         "greeter"
//!     }
//!
//!     fn step(&mut self, _cx: &mut Context) -> Step {
//!         loop {
//!             match self.phase {
//!                 Phase::Send => {
//!                     if self.at == 3 {
//!                         finish!();
//!                     }
//!                     await_ready!(TX.can_write());
//!                     TX.write(b"hi\n"[self.at]);
//!                     self.at += 1;
//!                     yield_to!(self.phase, Phase::Send);
//!                 }
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! Locals declared before a suspension macro do not survive it; anything a
//! later phase needs must live in the struct.

#[cfg(test)]
extern crate std;

pub mod channel;
pub mod kernel;
pub mod macros;
pub mod routine;
pub mod scheduler;
pub mod trace;

pub use channel::{ByteChannel, Channel};
pub use kernel::{kernel, loop_once, register, setup, Kernel, MAX_ROUTINES};
pub use routine::{Context, Routine};
pub use scheduler::{RoutineInfo, Scheduler};
pub use trace::{TraceEvent, TraceHook};

pub use weave_core::{duration, Clock, Duration, Error, Instant, Result, Status, Step};

#[cfg(test)]
mod tests;
