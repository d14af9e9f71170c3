//! Line buffer — one logical line of input plus its cursor.
//!
//! A `LineBuffer` is the whole edit state of a prompt session: the chars
//! typed so far and a cursor index into them. It is owned by exactly one
//! editing session and mutated in place by [`Edit`] commands.
//!
//! The cursor is a char index in `0..=len`. Position `len` is "after the
//! last char", where typing appends. Every mutation leaves the cursor
//! clamped to that range.

use std::fmt;

use crate::word;

/// A single edit command.
///
/// Produced by the control-key dispatcher and by the escape-sequence
/// decoder, so both input paths share one implementation of each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Insert a char at the cursor and advance past it.
    Insert(char),
    /// Move one char left (stops at 0).
    Left,
    /// Move one char right (stops at `len`).
    Right,
    /// Move to the start of the line.
    Home,
    /// Move to the end of the line.
    End,
    /// Move to the start of the previous word.
    WordLeft,
    /// Move past the end of the next word.
    WordRight,
    /// Delete the char before the cursor.
    Backspace,
    /// Delete the char under the cursor.
    DeleteForward,
    /// Delete from the cursor to the end of the line.
    KillToEnd,
    /// Delete from the start of the line to the cursor.
    KillToStart,
    /// Delete from the start of the previous word to the cursor.
    KillWordBackward,
}

/// The edit buffer and cursor of one prompt session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    /// An empty buffer with the cursor at 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
        }
    }

    /// A buffer holding `text` with the cursor at `cursor` (clamped).
    #[must_use]
    pub fn with_cursor(text: &str, cursor: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = cursor.min(chars.len());
        Self { chars, cursor }
    }

    /// The buffer contents.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of chars in the buffer.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Cursor position as a char index.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply one edit command.
    pub fn apply(&mut self, edit: Edit) {
        match edit {
            Edit::Insert(ch) => {
                self.chars.insert(self.cursor, ch);
                self.cursor += 1;
            }
            Edit::Left => self.cursor = self.cursor.saturating_sub(1),
            Edit::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            Edit::Home => self.cursor = 0,
            Edit::End => self.cursor = self.chars.len(),
            Edit::WordLeft => self.cursor = word::word_left(&self.chars, self.cursor),
            Edit::WordRight => self.cursor = word::word_right(&self.chars, self.cursor),
            Edit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            Edit::DeleteForward => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            Edit::KillToEnd => self.chars.truncate(self.cursor),
            Edit::KillToStart => {
                self.cursor = word::kill_line_backward(&mut self.chars, self.cursor);
            }
            Edit::KillWordBackward => {
                self.cursor = word::kill_word_backward(&mut self.chars, self.cursor);
            }
        }
    }
}

impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| fmt::Write::write_char(f, *ch))
    }
}

impl From<&str> for LineBuffer {
    /// Cursor at the end, as if `text` had just been typed.
    fn from(text: &str) -> Self {
        Self::with_cursor(text, usize::MAX)
    }
}
