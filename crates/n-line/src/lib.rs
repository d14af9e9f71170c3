//! # n-line — Line editing core for n-prompt
//!
//! Everything that happens between "the prompt is on screen" and "the user
//! pressed Enter":
//!
//! - **[`line`]** — `LineBuffer` (chars + cursor) and the `Edit` commands that mutate it
//! - **[`word`]** — whitespace-delimited word motions and kills
//! - **[`escape`]** — reading escape sequences and mapping them to edits
//! - **[`render`]** — wrap-aware redraw with minimal relative cursor motion
//! - **[`editor`]** — the raw-mode byte dispatch loop tying it all together
//! - **[`error`]** — the error taxonomy shared with the prompt layer

pub mod editor;
pub mod error;
pub mod escape;
pub mod line;
pub mod render;
pub mod word;

pub use editor::{LineEditor, Outcome, Session};
pub use error::{Error, ErrorKind};
