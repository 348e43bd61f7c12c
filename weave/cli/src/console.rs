//! The host console seam.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use weave_rt::channel::ByteChannel;

/// Byte-oriented character stream supplied by the host.
///
/// All operations are non-blocking; routines gate on input with
/// `await_some!(console.poll_byte())`. Output that does not fit the host's
/// transmit path may be dropped, mirroring the channel write policy.
pub trait Console: Sync {
    /// Take the next received byte, if one is pending.
    fn poll_byte(&self) -> Option<u8>;

    /// Emit one byte.
    fn write_byte(&self, byte: u8);

    /// Emit raw bytes.
    fn write_bytes(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Emit a string.
    fn write_str(&self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Emit a string followed by a newline.
    fn write_line(&self, s: &str) {
        self.write_str(s);
        self.write_byte(b'\n');
    }
}

/// In-memory console: scripted input, captured output.
///
/// `RX` bounds the pending input, `TX` the captured output. Used by tests
/// and host demos in place of a serial port.
pub struct BufferConsole<const RX: usize, const TX: usize> {
    input: ByteChannel<RX>,
    output: Mutex<RefCell<Vec<u8, TX>>>,
}

impl<const RX: usize, const TX: usize> BufferConsole<RX, TX> {
    pub const fn new() -> Self {
        Self {
            input: ByteChannel::new(),
            output: Mutex::new(RefCell::new(Vec::new())),
        }
    }

    /// Queue `text` as pending input. Returns `false` if any byte was
    /// dropped for lack of buffer space.
    pub fn push_input(&self, text: &str) -> bool {
        self.push_input_bytes(text.as_bytes())
    }

    /// Queue raw bytes as pending input. Returns `false` if any byte was
    /// dropped for lack of buffer space.
    pub fn push_input_bytes(&self, bytes: &[u8]) -> bool {
        let mut all_accepted = true;
        for &byte in bytes {
            all_accepted &= self.input.write(byte);
        }
        all_accepted
    }

    /// Drain everything written so far.
    pub fn take_output(&self) -> Vec<u8, TX> {
        critical_section::with(|cs| core::mem::take(&mut *self.output.borrow_ref_mut(cs)))
    }
}

impl<const RX: usize, const TX: usize> Default for BufferConsole<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RX: usize, const TX: usize> Console for BufferConsole<RX, TX> {
    fn poll_byte(&self) -> Option<u8> {
        self.input.read()
    }

    fn write_byte(&self, byte: u8) {
        critical_section::with(|cs| {
            let _ = self.output.borrow_ref_mut(cs).push(byte);
        });
    }
}
