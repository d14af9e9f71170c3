// SPDX-License-Identifier: MIT
//
// n-term — Terminal plumbing for n-prompt.
//
// The lowest layer of the prompt stack: everything that touches the
// terminal device or the raw byte stream lives here. Raw mode goes through
// termios directly, with an RAII guard that restores the saved mode on
// every exit path. Output is plain ANSI relative cursor motion, never
// absolute positioning, because an inline prompt does not know which
// screen row it is on. Input is a buffered byte source with one byte of
// pushback, shared by the raw-mode editor and the line-reader worker.
//
// Like the rest of the stack, this crate avoids terminal frameworks
// (crossterm, termion) in favor of direct termios and escape sequences.

pub mod ansi;
pub mod reader;
pub mod source;
pub mod terminal;
