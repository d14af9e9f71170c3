//! Questions — ask, password, confirm.
//!
//! A [`Prompt`] writes the question, reads one answer, and decides whether
//! to accept it:
//!
//! 1. An empty answer becomes the default if there is one. Otherwise it is
//!    accepted when the question is optional and asked again when not.
//! 2. Each check runs in order. The first failure prints its message on
//!    its own line and the question is asked again.
//!
//! Terminal input is edited in raw mode on the calling thread. Any other
//! input is scanned by a worker thread so the cancel token can interrupt
//! the wait. An answer that ended the stream is never re-asked: an empty
//! one resolves to the default, to `""` when optional, or to
//! [`Error::Required`], and a rejected one yields [`Error::EndOfInput`].

use std::io::Write;
use std::sync::{Arc, PoisonError};

use crossbeam_channel::select;
use n_line::{Error, LineEditor, Outcome, Session};
use n_term::reader::{self, ScannedLine};
use unicode_width::UnicodeWidthStr;

use crate::cancel::CancelToken;
use crate::io::{Input, Output};
use crate::options::Options;

/// Ask a question and return the answer.
///
/// # Errors
///
/// See [`Prompt::ask`].
pub fn ask(cancel: &CancelToken, prompt: &str, options: Options) -> Result<String, Error> {
    Prompt::new(options).ask(cancel, prompt)
}

/// Ask for a secret without echoing it.
///
/// # Errors
///
/// See [`Prompt::password`].
pub fn password(cancel: &CancelToken, prompt: &str, options: Options) -> Result<String, Error> {
    Prompt::new(options).password(cancel, prompt)
}

/// Ask a yes/no question.
///
/// # Errors
///
/// See [`Prompt::confirm`].
pub fn confirm(cancel: &CancelToken, prompt: &str, options: Options) -> Result<bool, Error> {
    Prompt::new(options).confirm(cancel, prompt)
}

/// One answer as read, before the accept rules run.
#[derive(Debug)]
struct Reply {
    text: String,
    at_eof: bool,
}

impl From<ScannedLine> for Reply {
    fn from(line: ScannedLine) -> Self {
        Self {
            text: line.text,
            at_eof: line.at_eof,
        }
    }
}

/// A configured question, ready to be asked.
#[derive(Debug)]
pub struct Prompt {
    options: Options,
    input: Input,
    output: Output,
}

impl Prompt {
    /// Bind `options`, falling back to stdin and stdout.
    #[must_use]
    pub fn new(mut options: Options) -> Self {
        let input = options.input.take().unwrap_or_else(Input::stdin);
        let output = options.output.take().unwrap_or_else(Output::stdout);
        Self {
            options,
            input,
            output,
        }
    }

    /// Write `prompt` and read an answer, re-asking until one is accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if `cancel` fires first.
    /// - [`Error::Interrupted`] on Ctrl+C at a terminal.
    /// - [`Error::Required`] if input ends with nothing typed, no default,
    ///   and the question is not optional.
    /// - [`Error::EndOfInput`] if a check rejects the last answer the input
    ///   will ever give.
    /// - [`Error::Device`] on I/O failure.
    pub fn ask(&mut self, cancel: &CancelToken, prompt: &str) -> Result<String, Error> {
        let text = format!("{prompt} ");
        let input_offset = text.width();
        tracing::debug!(target: "prompt.session", kind = "ask", input_offset, "question");

        loop {
            self.write(text.as_bytes())?;
            let reply = self.read_line(cancel, input_offset)?;
            if let Some(answer) = self.accept(reply)? {
                return Ok(answer);
            }
        }
    }

    /// Like [`ask`](Self::ask), but the answer is not echoed. A newline is
    /// written after every answer.
    ///
    /// # Errors
    ///
    /// As for [`ask`](Self::ask), except that a terminal read is not
    /// interruptible by Ctrl+C or `cancel` once it has started.
    pub fn password(&mut self, cancel: &CancelToken, prompt: &str) -> Result<String, Error> {
        let text = format!("{prompt} ");
        tracing::debug!(target: "prompt.session", kind = "password", "question");

        loop {
            self.write(text.as_bytes())?;
            let reply = self.read_secret(cancel)?;
            self.write(b"\n")?;
            tracing::debug!(target: "prompt.session", len = reply.text.len(), "secret_read");
            if let Some(answer) = self.accept(reply)? {
                return Ok(answer);
            }
        }
    }

    /// Ask until the answer is `y`, `yes`, `n` or `no` (any case). Returns
    /// `true` for yes.
    ///
    /// # Errors
    ///
    /// As for [`ask`](Self::ask).
    pub fn confirm(&mut self, cancel: &CancelToken, prompt: &str) -> Result<bool, Error> {
        self.options.checks.push(Box::new(yes_or_no));
        let answer = self.ask(cancel, prompt)?;
        Ok(is_yes(&answer))
    }

    /// Apply the empty-answer rules and the checks. `None` means ask again.
    fn accept(&mut self, reply: Reply) -> Result<Option<String>, Error> {
        if reply.text.is_empty() {
            if let Some(default) = self.options.default_value() {
                return Ok(Some(default.to_owned()));
            }
            if !self.options.optional {
                if reply.at_eof {
                    return Err(Error::Required);
                }
                return Ok(None);
            }
        }

        let failure = self.options.checks.iter().find_map(|check| check(&reply.text).err());
        let Some(message) = failure else {
            return Ok(Some(reply.text));
        };

        tracing::debug!(target: "prompt.session", at_eof = reply.at_eof, "check_failed");
        self.write(format!("{message}\n").as_bytes())?;
        if reply.at_eof {
            return Err(Error::EndOfInput);
        }
        Ok(None)
    }

    fn read_line(&mut self, cancel: &CancelToken, input_offset: usize) -> Result<Reply, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let Some(terminal) = &self.input.terminal else {
            return self.scan(cancel);
        };

        let mut terminal = terminal.lock().unwrap_or_else(PoisonError::into_inner);
        let mut source = self.input.source.lock().unwrap_or_else(PoisonError::into_inner);
        // An empty line at end of input comes back as `EndOfInput("")`, so
        // `accept` applies the default and optional rules for both paths.
        let session = Session {
            default: None,
            optional: true,
            input_offset,
        };

        match LineEditor::new(&mut *source, &mut self.output, &session).read_line(&mut *terminal)? {
            Outcome::Completed(text) => Ok(Reply {
                text,
                at_eof: false,
            }),
            Outcome::EndOfInput(text) => Ok(Reply { text, at_eof: true }),
            Outcome::Interrupted => Err(Error::Interrupted),
        }
    }

    fn read_secret(&mut self, cancel: &CancelToken) -> Result<Reply, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let Some(terminal) = &self.input.terminal else {
            return self.scan(cancel);
        };

        let bytes = terminal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_password()
            .map_err(Error::device("read password"))?;
        Ok(Reply {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            at_eof: false,
        })
    }

    /// Scan one line on a worker, racing it against `cancel`.
    fn scan(&self, cancel: &CancelToken) -> Result<Reply, Error> {
        let rx = reader::spawn_line_reader(Arc::clone(&self.input.source))
            .map_err(Error::device("spawn line reader"))?;

        select! {
            recv(rx) -> msg => match msg {
                Ok(Ok(line)) => Ok(Reply::from(line)),
                Ok(Err(err)) => Err(Error::device("read input")(err)),
                Err(_) => Err(Error::device("read input")(std::io::Error::other("line reader exited"))),
            },
            recv(cancel.receiver()) -> _ => {
                tracing::debug!(target: "prompt.worker", "abandoned");
                Err(Error::Cancelled)
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.output
            .write_all(bytes)
            .and_then(|()| self.output.flush())
            .map_err(Error::device("write output"))
    }
}

fn yes_or_no(answer: &str) -> Result<(), String> {
    match answer.to_lowercase().as_str() {
        "y" | "yes" | "n" | "no" => Ok(()),
        _ => Err(format!("invalid value {answer:?}, must enter yes or no")),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes" | "true")
}
