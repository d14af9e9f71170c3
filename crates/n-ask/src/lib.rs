//! # n-ask — Questions for command-line programs
//!
//! The top of the n-prompt stack. Ask for a line, a password, or a yes/no
//! answer, with defaults, optional answers, validation, and cancellation:
//!
//! - **[`prompt`]** — `ask`, `password`, `confirm` and the `Prompt` that runs them
//! - **[`options`]** — per-question configuration
//! - **[`io`]** — `Input` / `Output` handles (stdin, stdout, readers, writers)
//! - **[`cancel`]** — the one-shot cancel signal
//!
//! ```no_run
//! use n_ask::{CancelToken, Options};
//!
//! let token = CancelToken::never();
//! let name = n_ask::ask(&token, "What is your name?", Options::new())?;
//! let ok = n_ask::confirm(&token, "Continue? (yes/no)", Options::new())?;
//! # Ok::<(), n_ask::Error>(())
//! ```

pub mod cancel;
pub mod io;
pub mod options;
pub mod prompt;

pub use cancel::{CancelToken, Canceller, cancel_pair};
pub use io::{Input, Output};
pub use n_line::{Error, ErrorKind};
pub use options::{Check, Options};
pub use prompt::{Prompt, ask, confirm, password};
