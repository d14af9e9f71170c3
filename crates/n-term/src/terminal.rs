// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, viewport width, secret reads, RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd reads. These are
// the standard POSIX interfaces for terminal control; there is no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// The line editor talks to the terminal through the `TerminalControl`
// trait rather than the concrete `Terminal`. That keeps the editing loop
// testable with an in-memory fake, and keeps every termios call in this
// one file.
//
// Raw mode is only ever held through a `RawMode` guard. The guard restores
// the saved termios in `Drop`, so every exit from the editing loop (a
// finished line, Ctrl+C, end of input, or an I/O error deep inside a read)
// puts the terminal back the way it found it.

use std::io;

// ─── TerminalControl ────────────────────────────────────────────────────────

/// The operations the line editor needs from an interactive terminal.
///
/// Implementors store the mode that was active before
/// [`enable_raw_mode`](Self::enable_raw_mode) and put it back in
/// [`disable_raw_mode`](Self::disable_raw_mode).
pub trait TerminalControl: Send {
    /// Switch the device to raw mode: no canonical line buffering, no
    /// local echo, no signal generation, no output processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the device mode cannot be read or changed.
    fn enable_raw_mode(&mut self) -> io::Result<()>;

    /// Restore the mode saved by `enable_raw_mode`. No-op if raw mode is
    /// not active.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved mode cannot be applied.
    fn disable_raw_mode(&mut self) -> io::Result<()>;

    /// Number of columns in the viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the size query fails.
    fn width(&self) -> io::Result<u16>;

    /// Read one line with echo disabled, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode switch or the read fails.
    fn read_password(&mut self) -> io::Result<Vec<u8>>;
}

// ─── RawMode guard ──────────────────────────────────────────────────────────

/// Raw mode held for the lifetime of the guard.
///
/// ```no_run
/// use n_term::terminal::{RawMode, Terminal};
///
/// let mut term = Terminal::stdin().expect("stdin is a terminal");
/// {
///     let _raw = RawMode::enter(&mut term)?;
///     // ... read bytes one at a time ...
/// } // restored here, on every path out of the block
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RawMode<'a> {
    control: &'a mut dyn TerminalControl,
}

impl<'a> RawMode<'a> {
    /// Enable raw mode and return the guard that restores it.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be entered. Nothing needs to be
    /// restored in that case.
    pub fn enter(control: &'a mut dyn TerminalControl) -> io::Result<Self> {
        control.enable_raw_mode()?;
        tracing::trace!(target: "prompt.raw_mode", "enter");
        Ok(Self { control })
    }

    /// The guarded terminal, for queries made while raw mode is held.
    #[must_use]
    pub fn control(&self) -> &dyn TerminalControl {
        &*self.control
    }
}

impl Drop for RawMode<'_> {
    fn drop(&mut self) {
        match self.control.disable_raw_mode() {
            Ok(()) => tracing::trace!(target: "prompt.raw_mode", "restore"),
            Err(err) => {
                tracing::warn!(target: "prompt.raw_mode", error = %err, "restore_failed");
            }
        }
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Check whether `fd` refers to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty(fd: std::os::unix::io::RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

/// Query the column count of the terminal behind `fd` via `ioctl(TIOCGWINSZ)`.
///
/// # Errors
///
/// Returns the OS error if the ioctl fails.
#[cfg(unix)]
pub fn get_width(fd: std::os::unix::io::RawFd) -> io::Result<u16> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 {
        Ok(ws.ws_col)
    } else {
        Err(io::Error::last_os_error())
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// A terminal device identified by its file descriptor.
///
/// Construction only succeeds for descriptors that are TTYs, so holding a
/// `Terminal` is proof the input is interactive.
#[cfg(unix)]
pub struct Terminal {
    fd: std::os::unix::io::RawFd,

    /// Original termios saved before entering raw mode.
    original_termios: Option<libc::termios>,
}

#[cfg(unix)]
impl Terminal {
    /// Wrap `fd` if it is a terminal.
    #[must_use]
    pub fn from_fd(fd: std::os::unix::io::RawFd) -> Option<Self> {
        is_tty(fd).then_some(Self {
            fd,
            original_termios: None,
        })
    }

    /// The process's standard input, if it is a terminal.
    #[must_use]
    pub fn stdin() -> Option<Self> {
        Self::from_fd(libc::STDIN_FILENO)
    }

    /// Whether raw mode is currently active.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.original_termios.is_some()
    }

    fn get_termios(&self) -> io::Result<libc::termios> {
        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(self.fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(termios)
        }
    }

    fn set_termios(&self, termios: &libc::termios) -> io::Result<()> {
        unsafe {
            if libc::tcsetattr(self.fd, libc::TCSANOW, termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    /// Blocking read of a single byte straight from the descriptor.
    fn read_fd_byte(&self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        loop {
            let n = unsafe { libc::read(self.fd, (&raw mut byte).cast(), 1) };
            match n {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(err);
                    }
                }
            }
        }
    }
}

#[cfg(unix)]
impl TerminalControl for Terminal {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if self.original_termios.is_some() {
            return Ok(());
        }

        let original = self.get_termios()?;
        let mut termios = original;

        // cfmakeraw equivalent: disable all line processing.
        termios.c_iflag &= !(libc::IGNBRK
            | libc::BRKINT
            | libc::PARMRK
            | libc::ISTRIP
            | libc::INLCR
            | libc::IGNCR
            | libc::ICRNL
            | libc::IXON);
        termios.c_oflag &= !libc::OPOST;
        termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
        termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
        termios.c_cflag |= libc::CS8;

        // VMIN=1, VTIME=0: read() blocks until at least 1 byte available.
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;

        self.set_termios(&termios)?;
        self.original_termios = Some(original);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(original) = self.original_termios {
            self.set_termios(&original)?;
            self.original_termios = None;
        }
        Ok(())
    }

    fn width(&self) -> io::Result<u16> {
        get_width(self.fd)
    }

    fn read_password(&mut self) -> io::Result<Vec<u8>> {
        let original = self.get_termios()?;
        let mut termios = original;

        // Canonical input without echo; keep Ctrl+C as a signal.
        termios.c_lflag &= !libc::ECHO;
        termios.c_lflag |= libc::ICANON | libc::ISIG;
        termios.c_iflag |= libc::ICRNL;
        self.set_termios(&termios)?;

        let mut line = Vec::new();
        let read = loop {
            match self.read_fd_byte() {
                Ok(Some(b'\n') | None) => break Ok(()),
                Ok(Some(b'\r')) => {}
                Ok(Some(b)) => line.push(b),
                Err(err) => break Err(err),
            }
        };

        let restored = self.set_termios(&original);
        read?;
        restored?;
        Ok(line)
    }
}

#[cfg(unix)]
impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.disable_raw_mode();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call so tests can check pairing of enter/restore.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        raw: bool,
        fail_enter: bool,
        fail_restore: bool,
    }

    impl TerminalControl for Recorder {
        fn enable_raw_mode(&mut self) -> io::Result<()> {
            self.calls.push("enable");
            if self.fail_enter {
                return Err(io::Error::other("tcsetattr"));
            }
            self.raw = true;
            Ok(())
        }

        fn disable_raw_mode(&mut self) -> io::Result<()> {
            self.calls.push("disable");
            if self.fail_restore {
                return Err(io::Error::other("tcsetattr"));
            }
            self.raw = false;
            Ok(())
        }

        fn width(&self) -> io::Result<u16> {
            Ok(80)
        }

        fn read_password(&mut self) -> io::Result<Vec<u8>> {
            Ok(b"hunter2".to_vec())
        }
    }

    // ── RawMode guard ────────────────────────────────────────────────

    #[test]
    fn guard_restores_on_drop() {
        let mut rec = Recorder::default();
        {
            let guard = RawMode::enter(&mut rec).unwrap();
            assert_eq!(guard.control().width().unwrap(), 80);
        }
        assert!(!rec.raw);
        assert_eq!(rec.calls, ["enable", "disable"]);
    }

    #[test]
    fn guard_restores_on_early_return() {
        fn fallible(rec: &mut Recorder) -> io::Result<()> {
            let _raw = RawMode::enter(rec)?;
            Err(io::Error::other("read failed"))
        }

        let mut rec = Recorder::default();
        assert!(fallible(&mut rec).is_err());
        assert!(!rec.raw);
        assert_eq!(rec.calls, ["enable", "disable"]);
    }

    #[test]
    fn failed_enter_does_not_restore() {
        let mut rec = Recorder {
            fail_enter: true,
            ..Recorder::default()
        };
        assert!(RawMode::enter(&mut rec).is_err());
        assert_eq!(rec.calls, ["enable"]);
    }

    #[test]
    fn failed_restore_does_not_panic() {
        let mut rec = Recorder {
            fail_restore: true,
            ..Recorder::default()
        };
        drop(RawMode::enter(&mut rec).unwrap());
        assert_eq!(rec.calls, ["enable", "disable"]);
    }

    // ── Terminal ─────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty(libc::STDIN_FILENO);
    }

    #[cfg(unix)]
    #[test]
    fn non_tty_fd_is_rejected() {
        let fd = unsafe { libc::open(c"/dev/null".as_ptr(), libc::O_RDONLY) };
        assert!(fd >= 0);
        assert!(Terminal::from_fd(fd).is_none());
        unsafe { libc::close(fd) };
    }

    #[cfg(unix)]
    #[test]
    fn get_width_on_non_tty_fails() {
        let fd = unsafe { libc::open(c"/dev/null".as_ptr(), libc::O_RDONLY) };
        assert!(get_width(fd).is_err());
        unsafe { libc::close(fd) };
    }
}
