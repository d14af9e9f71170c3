//! Where prompts read from and write to.
//!
//! An [`Input`] is a shared byte source plus, when the source is a
//! terminal, the [`TerminalControl`] that drives raw mode for it. Both are
//! behind `Arc<Mutex<_>>` so an `Input` can be cloned into several
//! questions and handed to the line-reader worker; consecutive questions
//! on the same `Input` see one continuous stream.
//!
//! [`Input::stdin`] returns the same process-wide handle on every call, so
//! bytes buffered by one question are not lost to the next.

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use n_term::reader::SharedSource;
use n_term::source::ByteSource;
use n_term::terminal::TerminalControl;

type BoxedReader = Box<dyn Read + Send>;

/// The input side of a prompt.
#[derive(Clone)]
pub struct Input {
    pub(crate) source: SharedSource<BoxedReader>,
    pub(crate) terminal: Option<Arc<Mutex<dyn TerminalControl>>>,
}

impl Input {
    /// Standard input, with a terminal attached when stdin is a TTY.
    #[must_use]
    pub fn stdin() -> Self {
        static STDIN: OnceLock<Input> = OnceLock::new();
        STDIN
            .get_or_init(|| {
                let input = Self::from_reader(io::stdin());
                #[cfg(unix)]
                let input = match n_term::terminal::Terminal::stdin() {
                    Some(terminal) => input.with_terminal(terminal),
                    None => input,
                };
                tracing::debug!(target: "prompt.session", interactive = input.is_terminal(), "stdin");
                input
            })
            .clone()
    }

    /// A non-interactive input over any reader.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            source: Arc::new(Mutex::new(ByteSource::new(Box::new(reader) as BoxedReader))),
            terminal: None,
        }
    }

    /// An input over a descriptor-backed reader (a `File` opened on a tty,
    /// say). Interactive if the descriptor is a terminal.
    #[cfg(unix)]
    pub fn from_fd<R>(reader: R) -> Self
    where
        R: Read + std::os::unix::io::AsRawFd + Send + 'static,
    {
        let terminal = n_term::terminal::Terminal::from_fd(reader.as_raw_fd());
        let input = Self::from_reader(reader);
        match terminal {
            Some(terminal) => input.with_terminal(terminal),
            None => input,
        }
    }

    /// Attach terminal control, making this input interactive.
    #[must_use]
    pub fn with_terminal<T: TerminalControl + 'static>(mut self, terminal: T) -> Self {
        self.terminal = Some(Arc::new(Mutex::new(terminal)));
        self
    }

    /// Whether reads go through the raw-mode editor.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("terminal", &self.is_terminal())
            .finish_non_exhaustive()
    }
}

/// The output side of a prompt. Clones write to the same sink.
#[derive(Clone)]
pub struct Output {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    /// Standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}
