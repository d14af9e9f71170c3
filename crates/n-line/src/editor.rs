//! Raw-mode line editor — the byte dispatch loop.
//!
//! [`LineEditor::read_line`] puts the terminal in raw mode, reads input one
//! byte at a time, turns each byte into an [`Edit`] (or a finishing
//! action), and repaints the line after every edit. Raw mode is held by a
//! [`RawMode`] guard, so it is restored on every way out of the loop.
//!
//! # Keys
//!
//! | Byte | Action |
//! |------|--------|
//! | CR / LF | finish with the current line |
//! | `Ctrl+C` | echo `^C`, finish as interrupted |
//! | `Ctrl+A` / `Ctrl+E` | start / end of line |
//! | `Ctrl+B` / `Ctrl+F` | one char left / right |
//! | `Ctrl+K` / `Ctrl+U` | kill to end / to start of line |
//! | `Ctrl+W` | kill previous word |
//! | `Ctrl+D` | end of input on an empty line, else forward delete |
//! | BS / DEL | delete char before cursor |
//! | ESC | escape sequence, see [`crate::escape`] |
//! | other | insert the UTF-8 char it starts; other control chars are ignored |

use std::io::{Read, Write};

use n_term::ansi;
use n_term::source::ByteSource;
use n_term::terminal::{RawMode, TerminalControl};

use crate::error::Error;
use crate::escape;
use crate::line::{Edit, LineBuffer};
use crate::render::{Layout, Renderer};

/// Per-session settings supplied by the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Answer used when input ends with nothing typed.
    pub default: Option<String>,
    /// Whether an empty answer is acceptable.
    pub optional: bool,
    /// Display columns the prompt occupies before the input starts.
    pub input_offset: usize,
}

impl Session {
    /// Resolve an empty answer at end of input: default, then empty if
    /// optional, else [`Error::Required`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Required`] when neither a default nor an empty
    /// answer is allowed.
    pub fn resolve_empty(&self) -> Result<String, Error> {
        match &self.default {
            Some(default) if !default.is_empty() => Ok(default.clone()),
            _ if self.optional => Ok(String::new()),
            _ => Err(Error::Required),
        }
    }
}

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user pressed Enter.
    Completed(String),
    /// Input ended (stream closed or Ctrl+D). Holds whatever was typed, or
    /// the value an empty line resolved to.
    EndOfInput(String),
    /// The user pressed Ctrl+C.
    Interrupted,
}

/// What one input byte did.
enum Step {
    /// The buffer may have changed; repaint.
    Redraw,
    /// Nothing changed.
    Ignore,
    /// The session is over.
    Done(Outcome),
}

/// One raw-mode editing session over a byte source and an output sink.
pub struct LineEditor<'a, R, W> {
    source: &'a mut ByteSource<R>,
    output: &'a mut W,
    session: &'a Session,
}

impl<'a, R: Read, W: Write> LineEditor<'a, R, W> {
    #[must_use]
    pub const fn new(source: &'a mut ByteSource<R>, output: &'a mut W, session: &'a Session) -> Self {
        Self {
            source,
            output,
            session,
        }
    }

    /// Run the session to completion on `terminal`.
    ///
    /// # Errors
    ///
    /// [`Error::Required`] if input ends on an empty line with no default
    /// and the session is not optional; [`Error::Device`] if raw mode, a
    /// read, or a write fails. Raw mode is restored in every case.
    pub fn read_line(&mut self, terminal: &mut dyn TerminalControl) -> Result<Outcome, Error> {
        let raw = RawMode::enter(terminal).map_err(Error::device("enter raw mode"))?;
        tracing::debug!(
            target: "prompt.session",
            input_offset = self.session.input_offset,
            "editor_start"
        );

        let result = self.run(raw.control());
        match &result {
            Ok(outcome) => tracing::debug!(target: "prompt.session", outcome = outcome_name(outcome), "editor_done"),
            Err(err) => tracing::debug!(target: "prompt.session", kind = ?err.kind(), "editor_failed"),
        }
        result
    }

    fn run(&mut self, terminal: &dyn TerminalControl) -> Result<Outcome, Error> {
        let mut line = LineBuffer::new();
        let mut renderer = Renderer::new(self.session.input_offset);

        loop {
            let Some(byte) = self.source.read_byte().map_err(Error::device("read input"))? else {
                return self.end_of_input(&line);
            };

            match self.dispatch(byte, &mut line)? {
                Step::Redraw => {
                    let layout = query_layout(terminal);
                    let mut frame = Vec::with_capacity(line.len() * 2 + 16);
                    renderer
                        .redraw(&mut frame, &line, layout)
                        .map_err(Error::device("render line"))?;
                    self.flush(&frame)?;
                }
                Step::Ignore => {}
                Step::Done(outcome) => return Ok(outcome),
            }
        }
    }

    fn dispatch(&mut self, byte: u8, line: &mut LineBuffer) -> Result<Step, Error> {
        let edit = match byte {
            b'\r' | b'\n' => {
                let mut frame = Vec::new();
                ansi::newline(&mut frame).map_err(Error::device("write output"))?;
                self.flush(&frame)?;
                return Ok(Step::Done(Outcome::Completed(line.to_string())));
            }
            0x03 => {
                let mut frame = Vec::new();
                ansi::interrupt_echo(&mut frame).map_err(Error::device("write output"))?;
                self.flush(&frame)?;
                return Ok(Step::Done(Outcome::Interrupted));
            }
            0x01 => Edit::Home,
            0x02 => Edit::Left,
            0x05 => Edit::End,
            0x06 => Edit::Right,
            0x0B => Edit::KillToEnd,
            0x15 => Edit::KillToStart,
            0x17 => Edit::KillWordBackward,
            0x04 => {
                if line.is_empty() {
                    return self.end_of_input(line).map(Step::Done);
                }
                Edit::DeleteForward
            }
            0x08 | 0x7F => Edit::Backspace,
            0x1B => {
                let seq = escape::read_escape_sequence(&mut *self.source)
                    .map_err(Error::device("read escape sequence"))?;
                escape::apply_escape_sequence(&seq, line);
                return Ok(Step::Redraw);
            }
            _ => {
                self.source.unread_byte().map_err(Error::device("read input"))?;
                match self.source.read_char().map_err(Error::device("read input"))? {
                    None => return self.end_of_input(line).map(Step::Done),
                    Some(ch) if ch.is_control() => return Ok(Step::Ignore),
                    Some(ch) => Edit::Insert(ch),
                }
            }
        };

        line.apply(edit);
        Ok(Step::Redraw)
    }

    /// Input ended: keep what was typed, otherwise resolve the empty line.
    fn end_of_input(&self, line: &LineBuffer) -> Result<Outcome, Error> {
        if line.is_empty() {
            self.session.resolve_empty().map(Outcome::EndOfInput)
        } else {
            Ok(Outcome::EndOfInput(line.to_string()))
        }
    }

    fn flush(&mut self, frame: &[u8]) -> Result<(), Error> {
        self.output
            .write_all(frame)
            .and_then(|()| self.output.flush())
            .map_err(Error::device("write output"))
    }
}

/// Pick the redraw layout from the current viewport width.
fn query_layout(terminal: &dyn TerminalControl) -> Layout {
    match terminal.width() {
        Ok(width) => {
            let layout = Layout::for_width(width);
            tracing::trace!(target: "prompt.render", width, ?layout, "layout");
            layout
        }
        Err(err) => {
            tracing::trace!(target: "prompt.render", error = %err, "width_unavailable");
            Layout::SingleRow
        }
    }
}

const fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Completed(_) => "completed",
        Outcome::EndOfInput(_) => "end_of_input",
        Outcome::Interrupted => "interrupted",
    }
}
