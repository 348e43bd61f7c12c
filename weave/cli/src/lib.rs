#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # weave-cli
//!
//! A byte-console command layer built on the routine contract: a
//! [`LineReader`] routine assembles console bytes into bounded lines and a
//! [`Dispatcher`] routine tokenizes each line and runs the matching handler
//! from a static command table. Commands have the form
//! `command arg1 arg2 ...`.
//!
//! Both routines talk to the host only through the [`Console`] seam and to
//! each other only through a [`LineChannel`], so the layer runs unchanged on
//! a UART or on the in-memory [`BufferConsole`] used by tests and demos.

pub mod console;
pub mod dispatch;
pub mod reader;

pub use console::{BufferConsole, Console};
pub use dispatch::{Command, CommandFn, Dispatcher, MAX_ARGS};
pub use reader::{Line, LineChannel, LineReader, LINE_CAP};
