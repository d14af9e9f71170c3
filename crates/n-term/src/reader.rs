// SPDX-License-Identifier: MIT
//
// Background line reader — one blocking read-until-newline on a worker.
//
// Used when the input is not a terminal. The worker thread performs a
// single `read_line` on the shared byte source and sends the result
// through a one-shot channel. The caller selects over that channel and a
// cancellation signal, so a cancelled prompt returns immediately.
//
// A blocking `read()` cannot be interrupted safely, so a cancelled worker
// is abandoned, not stopped: it stays parked in the read (still holding the
// source lock) until input arrives or the process exits. Callers cancel
// when they are about to shut down, which bounds the leak to one thread.
//
// Terminal input never goes through here. The raw-mode editor reads on the
// calling thread so raw mode is always restored before control returns.

use std::io::{self, Read};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use crossbeam_channel::{Receiver, bounded};

use crate::source::ByteSource;

/// A source shared between the prompt and its worker thread.
pub type SharedSource<R> = Arc<Mutex<ByteSource<R>>>;

/// One line as scanned by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Line contents with trailing `\r` and `\n` removed.
    pub text: String,
    /// `true` if the source ended before a newline was seen.
    pub at_eof: bool,
}

/// Spawn a worker that reads one line from `source`.
///
/// The returned receiver yields exactly one message. If the worker dies
/// without sending, the channel disconnects instead.
///
/// # Errors
///
/// Returns an error if the OS cannot spawn a new thread.
pub fn spawn_line_reader<R>(source: SharedSource<R>) -> io::Result<Receiver<io::Result<ScannedLine>>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = bounded(1);

    thread::Builder::new()
        .name("line-reader".into())
        .spawn(move || {
            let result = scan_line(&source);
            tracing::trace!(target: "prompt.worker", ok = result.is_ok(), "line_scanned");
            // Receiver gone means the prompt was cancelled; nobody is listening.
            let _ = tx.send(result);
        })?;

    Ok(rx)
}

/// Read one line from the shared source on the current thread.
///
/// # Errors
///
/// Propagates I/O errors from the source.
pub fn scan_line<R: Read>(source: &Mutex<ByteSource<R>>) -> io::Result<ScannedLine> {
    let mut source = source.lock().unwrap_or_else(PoisonError::into_inner);
    let mut buf = Vec::new();
    source.read_line(&mut buf)?;

    let at_eof = buf.last() != Some(&b'\n');
    let text = String::from_utf8_lossy(&buf)
        .trim_end_matches(['\r', '\n'])
        .to_owned();

    Ok(ScannedLine { text, at_eof })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn shared(bytes: &'static [u8]) -> SharedSource<&'static [u8]> {
        Arc::new(Mutex::new(ByteSource::new(bytes)))
    }

    fn line(text: &str, at_eof: bool) -> ScannedLine {
        ScannedLine {
            text: text.to_owned(),
            at_eof,
        }
    }

    // ── scan_line ────────────────────────────────────────────────────

    #[test]
    fn scan_strips_newline() {
        let src = shared(b"Mark\n27\n");
        assert_eq!(scan_line(&src).unwrap(), line("Mark", false));
        assert_eq!(scan_line(&src).unwrap(), line("27", false));
    }

    #[test]
    fn scan_strips_crlf() {
        let src = shared(b"Amy\r\n");
        assert_eq!(scan_line(&src).unwrap(), line("Amy", false));
    }

    #[test]
    fn scan_partial_line_at_eof() {
        let src = shared(b"tail");
        assert_eq!(scan_line(&src).unwrap(), line("tail", true));
    }

    #[test]
    fn scan_empty_source() {
        let src = shared(b"");
        assert_eq!(scan_line(&src).unwrap(), line("", true));
    }

    #[test]
    fn scan_blank_line_is_not_eof() {
        let src = shared(b"\n");
        assert_eq!(scan_line(&src).unwrap(), line("", false));
    }

    // ── Worker ───────────────────────────────────────────────────────

    #[test]
    fn worker_sends_one_line() {
        let src = shared(b"some password\n");
        let rx = spawn_line_reader(Arc::clone(&src)).unwrap();
        let got = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(got, line("some password", false));
    }

    #[test]
    fn worker_leaves_rest_of_source() {
        let src = shared(b"first\nsecond\n");
        let rx = spawn_line_reader(Arc::clone(&src)).unwrap();
        rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(scan_line(&src).unwrap(), line("second", false));
    }

    #[test]
    fn worker_survives_dropped_receiver() {
        let src = shared(b"ignored\n");
        drop(spawn_line_reader(Arc::clone(&src)).unwrap());
        // The worker still runs to completion and releases the lock.
        let mut tries = 0;
        while Arc::strong_count(&src) > 1 && tries < 500 {
            thread::sleep(Duration::from_millis(10));
            tries += 1;
        }
        assert_eq!(Arc::strong_count(&src), 1);
    }
}
