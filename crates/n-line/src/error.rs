//! Error taxonomy for a prompt session.
//!
//! Every failure a prompt can report is one variant of [`Error`]. Callers
//! compare by [`ErrorKind`] rather than by value, since device failures
//! carry an `io::Error` that is neither `Clone` nor `PartialEq`.

use std::io;

use thiserror::Error;

/// A failed prompt.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty input where the question is not optional and has no default.
    #[error("input is required")]
    Required,

    /// The user pressed Ctrl+C.
    #[error("interrupted")]
    Interrupted,

    /// The input stream closed and the answer it left behind was rejected.
    #[error("end of input")]
    EndOfInput,

    /// The terminal or the byte stream failed.
    #[error("{context}: {source}")]
    Device {
        /// What was being attempted.
        context: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The caller's cancellation signal fired before an answer arrived.
    #[error("cancelled")]
    Cancelled,
}

/// The kind of an [`Error`], for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Required,
    Interrupted,
    EndOfInput,
    Device,
    Cancelled,
}

impl Error {
    /// Which kind of failure this is.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::Required,
            Self::Interrupted => ErrorKind::Interrupted,
            Self::EndOfInput => ErrorKind::EndOfInput,
            Self::Device { .. } => ErrorKind::Device,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Adapter for `map_err` that wraps an I/O error with `context`.
    ///
    /// ```
    /// use n_line::error::{Error, ErrorKind};
    ///
    /// let err = Err::<(), _>(std::io::Error::other("boom"))
    ///     .map_err(Error::device("read input"))
    ///     .unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Device);
    /// assert_eq!(err.to_string(), "read input: boom");
    /// ```
    pub fn device(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Device { context, source }
    }
}
