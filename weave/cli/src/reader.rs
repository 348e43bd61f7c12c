//! Line assembly over the console byte stream.

use heapless::Vec;

use weave_rt::channel::Channel;
use weave_rt::{await_ready, await_some, yield_to, Context, Routine, Step};

use crate::console::Console;

/// Longest accepted command line, excluding the terminator.
pub const LINE_CAP: usize = 64;

/// One completed input line, as raw console bytes.
///
/// The console contract promises bytes, not text, so the line is carried
/// unchanged; [`as_str`](Line::as_str) converts where a consumer needs text.
/// A line longer than [`LINE_CAP`] is delivered with its head intact and
/// `truncated` set; the overflow up to the terminator is discarded. The
/// dispatcher reports such lines instead of running them.
pub struct Line {
    pub bytes: Vec<u8, LINE_CAP>,
    pub truncated: bool,
}

impl Line {
    /// The line as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Line {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=[u8]:a}{}",
            self.bytes.as_slice(),
            if self.truncated { " (truncated)" } else { "" }
        );
    }
}

/// Channel carrying completed lines from the reader to the dispatcher.
pub type LineChannel = Channel<Line, 2>;

enum Phase {
    Collect,
    Publish,
}

/// Routine that assembles console bytes into [`Line`]s.
///
/// Consumes every pending byte per step, so its per-step cost is bounded by
/// the console's receive buffer. Carriage returns are ignored; a bare line
/// feed terminates the line.
pub struct LineReader {
    console: &'static dyn Console,
    lines: &'static LineChannel,
    buf: Vec<u8, LINE_CAP>,
    truncated: bool,
    phase: Phase,
}

impl LineReader {
    pub const fn new(console: &'static dyn Console, lines: &'static LineChannel) -> Self {
        Self {
            console,
            lines,
            buf: Vec::new(),
            truncated: false,
            phase: Phase::Collect,
        }
    }
}

impl Routine for LineReader {
    fn name(&self) -> &'static str {
        "line-reader"
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        loop {
            match self.phase {
                Phase::Collect => {
                    let byte = await_some!(self.console.poll_byte());
                    match byte {
                        b'\r' => {}
                        b'\n' => self.phase = Phase::Publish,
                        _ => {
                            if self.buf.push(byte).is_err() {
                                self.truncated = true;
                            }
                        }
                    }
                }
                Phase::Publish => {
                    await_ready!(self.lines.can_write());
                    self.lines.write(Line {
                        bytes: core::mem::take(&mut self.buf),
                        truncated: self.truncated,
                    });
                    self.truncated = false;
                    yield_to!(self.phase, Phase::Collect);
                }
            }
        }
    }
}
