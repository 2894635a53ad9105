//! Newline framing for the hacker connection.
//!
//! Bytes arrive in arbitrary chunks. [`LineFramer`] keeps whatever follows the
//! last `\n` until a later chunk completes it, so a message split over several
//! packets is delivered exactly once.

use alloc::string::String;
use alloc::vec::Vec;

/// Accumulates raw bytes and splits them into `\n`-terminated lines.
///
/// After every fully drained [`Lines`] iterator the buffer holds at most one
/// partial line.
#[derive(Debug, Default, Clone)]
pub struct LineFramer {
    buf: Vec<u8>,
    /// Prefix of `buf` already known to hold no terminator.
    scanned: usize,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            scanned: 0,
        }
    }

    /// Append `chunk` and iterate over the complete lines now available.
    ///
    /// Lines are yielded without their terminator and decoded as UTF-8 with
    /// invalid sequences replaced by U+FFFD. Lines left unread when the
    /// iterator is dropped stay buffered for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.buf.extend_from_slice(chunk);
        Lines {
            buf: &mut self.buf,
            scanned: &mut self.scanned,
        }
    }

    /// Bytes received after the last terminator.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the framer, returning any unterminated remainder.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Lazy iterator over the complete lines produced by one [`LineFramer::feed`].
pub struct Lines<'a> {
    buf: &'a mut Vec<u8>,
    scanned: &'a mut usize,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let start = *self.scanned;
        let Some(offset) = self.buf[start..].iter().position(|b| *b == b'\n') else {
            *self.scanned = self.buf.len();
            return None;
        };
        let end = start + offset;
        let line = String::from_utf8_lossy(&self.buf[..end]).into_owned();
        self.buf.drain(..=end);
        *self.scanned = 0;
        Some(line)
    }
}
