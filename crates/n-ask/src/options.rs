//! Per-question configuration.
//!
//! [`Options`] is built with chainable setters and consumed once when a
//! [`Prompt`](crate::Prompt) is created:
//!
//! ```
//! use n_ask::Options;
//!
//! let options = Options::new()
//!     .with_default("21")
//!     .check(|s| s.parse::<u8>().map(drop).map_err(|e| e.to_string()));
//! assert_eq!(options.default.as_deref(), Some("21"));
//! assert_eq!(options.checks.len(), 1);
//! ```

use std::fmt;

use crate::io::{Input, Output};

/// A validator. `Err` carries the message shown before asking again.
pub type Check = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// How one question behaves and where it reads and writes.
#[derive(Default)]
pub struct Options {
    /// Answer used for empty input. An empty string counts as no default.
    pub default: Option<String>,
    /// Accept an empty answer.
    pub optional: bool,
    /// Validators, run in order on every answer.
    pub checks: Vec<Check>,
    /// Input override; standard input when `None`.
    pub input: Option<Input>,
    /// Output override; standard output when `None`.
    pub output: Option<Output>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        let default = default.into();
        self.default = (!default.is_empty()).then_some(default);
        self
    }

    #[must_use]
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Append a validator.
    #[must_use]
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    #[must_use]
    pub fn input(mut self, input: Input) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    /// The default, if one is set and non-empty.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("default", &self.default)
            .field("optional", &self.optional)
            .field("checks", &self.checks.len())
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .finish()
    }
}
