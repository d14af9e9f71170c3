// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit; that is the renderer's job. This module
// just knows the byte-level encoding of the handful of commands a line
// editor needs: relative cursor motion, carriage return, erase to end of
// line, and the raw-mode newline.
//
// Only relative motions are used. The line editor never knows its absolute
// screen row (the prompt may be anywhere in the scrollback), so every move
// is expressed as "up/down N rows, then carriage return, then right N".
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to a frame buffer (a `Vec<u8>`).
use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor `n` columns left (CUB).
///
/// `n` must be non-zero: terminals treat `CSI 0 D` as `CSI 1 D`.
#[inline]
pub fn cursor_left(w: &mut impl Write, n: usize) -> io::Result<()> {
    debug_assert!(n > 0, "CUB with zero count moves one column");
    write!(w, "\x1b[{n}D")
}

/// Move the cursor `n` columns right (CUF).
#[inline]
pub fn cursor_right(w: &mut impl Write, n: usize) -> io::Result<()> {
    debug_assert!(n > 0, "CUF with zero count moves one column");
    write!(w, "\x1b[{n}C")
}

/// Move the cursor `n` rows up (CUU).
#[inline]
pub fn cursor_up(w: &mut impl Write, n: usize) -> io::Result<()> {
    debug_assert!(n > 0, "CUU with zero count moves one row");
    write!(w, "\x1b[{n}A")
}

/// Move the cursor `n` rows down (CUD).
#[inline]
pub fn cursor_down(w: &mut impl Write, n: usize) -> io::Result<()> {
    debug_assert!(n > 0, "CUD with zero count moves one row");
    write!(w, "\x1b[{n}B")
}

/// Return the cursor to column 0 of the current row.
#[inline]
pub fn carriage_return(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\r")
}

// ─── Line ────────────────────────────────────────────────────────────────────

/// Erase from the cursor to the end of the line (EL 0).
#[inline]
pub fn erase_line_end(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Newline as raw mode needs it.
///
/// With `OPOST` disabled the terminal no longer translates `\n` into
/// `\r\n`, so the carriage return has to be explicit.
#[inline]
pub fn newline(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\r\n")
}

/// The caret notation echo for Ctrl+C, followed by a newline.
///
/// Raw mode disables `ISIG`, so the terminal driver no longer prints `^C`
/// for us.
#[inline]
pub fn interrupt_echo(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"^C\r\n")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: capture the output of an ANSI function as a string.
    fn capture(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ───────────────────────────────────────────────────────

    #[test]
    fn cursor_left_one() {
        assert_eq!(capture(|w| cursor_left(w, 1)), "\x1b[1D");
    }

    #[test]
    fn cursor_left_many() {
        assert_eq!(capture(|w| cursor_left(w, 42)), "\x1b[42D");
    }

    #[test]
    fn cursor_right_sequence() {
        assert_eq!(capture(|w| cursor_right(w, 7)), "\x1b[7C");
    }

    #[test]
    fn cursor_up_sequence() {
        assert_eq!(capture(|w| cursor_up(w, 2)), "\x1b[2A");
    }

    #[test]
    fn cursor_down_sequence() {
        assert_eq!(capture(|w| cursor_down(w, 3)), "\x1b[3B");
    }

    #[test]
    fn carriage_return_is_single_byte() {
        assert_eq!(capture(carriage_return), "\r");
    }

    // ── Line ─────────────────────────────────────────────────────────

    #[test]
    fn erase_line_end_sequence() {
        assert_eq!(capture(erase_line_end), "\x1b[K");
    }

    #[test]
    fn newline_is_crlf() {
        assert_eq!(capture(newline), "\r\n");
    }

    #[test]
    fn interrupt_echo_sequence() {
        assert_eq!(capture(interrupt_echo), "^C\r\n");
    }

    #[test]
    fn multiple_sequences_compose() {
        let mut buf = Vec::new();
        cursor_up(&mut buf, 1).unwrap();
        carriage_return(&mut buf).unwrap();
        cursor_right(&mut buf, 5).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\x1b[1A\r\x1b[5C");
    }
}
