// SPDX-License-Identifier: MIT
//
// Buffered byte source with one byte of pushback.
//
// The line editor consumes input one byte at a time: a control byte is a
// command, ESC starts a sequence, anything else is the lead byte of a UTF-8
// character. Deciding which of these it is requires looking at the byte
// first, so the source supports pushing exactly one byte back and then
// re-reading it as part of a whole character.
//
// The same source also serves the non-terminal path, which only needs
// "read until newline". Both paths share one `BufReader` so bytes buffered
// by one read are never lost to the next.

use std::io::{self, BufRead, BufReader, Read};

/// Character substituted for malformed UTF-8.
pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// A byte stream supporting single-byte reads, single-char reads, and a
/// one-byte unread.
pub struct ByteSource<R> {
    inner: BufReader<R>,
    /// Byte pushed back by [`unread_byte`](Self::unread_byte) or by a
    /// failed continuation-byte probe.
    pending: Option<u8>,
    /// The byte most recently handed out, eligible for unread.
    last: Option<u8>,
}

impl<R: Read> ByteSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            pending: None,
            last: None,
        }
    }

    /// Read one byte. Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying reader. `Interrupted`
    /// reads are retried.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.pending.take() {
            self.last = Some(b);
            return Ok(Some(b));
        }

        let byte = loop {
            match self.inner.fill_buf() {
                Ok([]) => break None,
                Ok(buf) => break Some(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        };

        if byte.is_some() {
            self.inner.consume(1);
        }
        self.last = byte;
        Ok(byte)
    }

    /// Push the most recently read byte back so the next read returns it.
    ///
    /// Only one byte of pushback is supported, and only directly after a
    /// successful [`read_byte`](Self::read_byte).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if there is no byte to unread.
    pub fn unread_byte(&mut self) -> io::Result<()> {
        match self.last.take() {
            Some(b) if self.pending.is_none() => {
                self.pending = Some(b);
                Ok(())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no byte to unread",
            )),
        }
    }

    /// Read one UTF-8 encoded character. Returns `Ok(None)` at end of input.
    ///
    /// Malformed input never fails: an invalid lead byte, a truncated
    /// sequence, or an invalid encoding yields [`REPLACEMENT`]. A byte that
    /// cannot continue the sequence is left unread.
    ///
    /// The replacement is per sequence, not per byte: a complete but
    /// invalid sequence (overlong `C0 80`, a surrogate `ED A0 80`) is
    /// consumed whole and yields one [`REPLACEMENT`]. A line editor inserts
    /// one placeholder for one bad keystroke that way.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying reader.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };

        let expected = utf8_char_len(lead);
        match expected {
            0 => return Ok(Some(REPLACEMENT)),
            1 => return Ok(Some(char::from(lead))),
            _ => {}
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in &mut bytes[1..expected] {
            match self.read_byte()? {
                Some(b) if b & 0xC0 == 0x80 => *slot = b,
                Some(b) => {
                    self.pending = Some(b);
                    self.last = None;
                    return Ok(Some(REPLACEMENT));
                }
                None => return Ok(Some(REPLACEMENT)),
            }
        }
        self.last = None;

        Ok(Some(
            std::str::from_utf8(&bytes[..expected])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(REPLACEMENT),
        ))
    }

    /// Read bytes up to and including `\n`, appending them to `buf`.
    ///
    /// Returns the number of bytes appended; `0` means end of input.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying reader.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.last = None;
        let mut n = 0;
        if let Some(b) = self.pending.take() {
            buf.push(b);
            n += 1;
            if b == b'\n' {
                return Ok(n);
            }
        }
        n += self.inner.read_until(b'\n', buf)?;
        Ok(n)
    }
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes, 0xF8..=0xFF).
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
