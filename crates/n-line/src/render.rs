//! Visual renderer — keeps the terminal line in sync with the buffer.
//!
//! After every edit the renderer repaints the input line using relative
//! cursor motion only. It remembers what the previous redraw left on
//! screen (cursor index and line length) so it knows where the terminal
//! cursor is and how much stale text to blank out.
//!
//! # Layouts
//!
//! Two strategies sit behind [`Renderer::redraw`], chosen per redraw from
//! the terminal width:
//!
//! - [`Layout::Wrapped`] — width known. Buffer index `i` lives at
//!   `divmod(input_col + i, width)` where `input_col` is the prompt's
//!   column on its row. Moves go up/down by rows, then carriage return,
//!   then right to the target column, so a line wrapped over several rows
//!   is handled exactly.
//! - [`Layout::SingleRow`] — width unknown. Assumes the line never wraps:
//!   back up by the old cursor, reprint, erase to end of line, back up to
//!   the new cursor.
//!
//! # The pending-wrap column
//!
//! After printing a char into the last column, terminals park the cursor
//! on that column (the "pending wrap" state) rather than moving to the
//! next row. So when a printed run ends exactly on a row boundary, the
//! cursor is still on the *previous* row. [`rendered_position`] models
//! that; [`visual_position`] is where a buffer index logically sits.

use std::io::{self, Write};

use n_term::ansi;

use crate::line::LineBuffer;

/// How the input line maps onto terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Width unknown; the line is assumed to fit on one row.
    SingleRow,
    /// Width known; the line wraps every `width` columns.
    Wrapped {
        /// Viewport width in columns (non-zero).
        width: usize,
    },
}

impl Layout {
    /// Layout for a viewport of `width` columns; `0` means unknown.
    #[must_use]
    pub const fn for_width(width: u16) -> Self {
        if width == 0 {
            Self::SingleRow
        } else {
            Self::Wrapped {
                width: width as usize,
            }
        }
    }
}

/// Redraw state for one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    /// Columns occupied by the prompt before the first buffer char.
    input_offset: usize,
    /// Cursor index at the last redraw (where the terminal cursor is).
    cursor: usize,
    /// Buffer length at the last redraw.
    len: usize,
}

impl Renderer {
    /// Fresh state: nothing drawn yet, terminal cursor right after the prompt.
    #[must_use]
    pub const fn new(input_offset: usize) -> Self {
        Self {
            input_offset,
            cursor: 0,
            len: 0,
        }
    }

    /// Repaint `line` and leave the terminal cursor at `line.cursor()`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `w`.
    pub fn redraw(&mut self, w: &mut impl Write, line: &LineBuffer, layout: Layout) -> io::Result<()> {
        match layout {
            Layout::SingleRow => redraw_single_row(w, line, self.cursor)?,
            Layout::Wrapped { width } => {
                let input_col = self.input_offset % width;
                move_visual_cursor(w, input_col, width, self.cursor, 0)?;
                write!(w, "{line}")?;

                let mut printed = line.len();
                if self.len > printed {
                    // Blank out the tail of the longer previous line.
                    write!(w, "{:1$}", "", self.len - printed)?;
                    printed = self.len;
                }
                move_rendered_cursor_to_logical(w, input_col, width, printed, line.cursor())?;
            }
        }

        self.cursor = line.cursor();
        self.len = line.len();
        Ok(())
    }
}

/// Single-row redraw for terminals of unknown width.
fn redraw_single_row(w: &mut impl Write, line: &LineBuffer, old_cursor: usize) -> io::Result<()> {
    if old_cursor > 0 {
        ansi::cursor_left(w, old_cursor)?;
    }
    write!(w, "{line}")?;
    ansi::erase_line_end(w)?;
    let back = line.len() - line.cursor();
    if back > 0 {
        ansi::cursor_left(w, back)?;
    }
    Ok(())
}

/// Row and column where buffer index `index` sits.
#[must_use]
pub const fn visual_position(input_col: usize, index: usize, width: usize) -> (usize, usize) {
    let absolute = input_col + index;
    (absolute / width, absolute % width)
}

/// Row and column of the terminal cursor right after printing up to
/// `index`.
///
/// Same as [`visual_position`] except a non-empty print ending on a row
/// boundary leaves the cursor on the last column of the row it filled.
#[must_use]
pub const fn rendered_position(input_col: usize, index: usize, width: usize) -> (usize, usize) {
    let (row, col) = visual_position(input_col, index, width);
    if index > 0 && col == 0 {
        (row - 1, width - 1)
    } else {
        (row, col)
    }
}

/// Move the terminal cursor from buffer index `from` to buffer index `to`.
/// Emits nothing when they are equal.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn move_visual_cursor(
    w: &mut impl Write,
    input_col: usize,
    width: usize,
    from: usize,
    to: usize,
) -> io::Result<()> {
    if from == to {
        return Ok(());
    }
    let (from_row, _) = visual_position(input_col, from, width);
    let (to_row, to_col) = visual_position(input_col, to, width);
    move_cursor(w, from_row, to_row, to_col)
}

/// Move the terminal cursor from the end of a print of `rendered` chars to
/// buffer index `logical`.
fn move_rendered_cursor_to_logical(
    w: &mut impl Write,
    input_col: usize,
    width: usize,
    rendered: usize,
    logical: usize,
) -> io::Result<()> {
    let (from_row, _) = rendered_position(input_col, rendered, width);
    let (to_row, to_col) = visual_position(input_col, logical, width);
    move_cursor(w, from_row, to_row, to_col)
}

/// Relative row move, then carriage return and a right move to `to_col`.
fn move_cursor(w: &mut impl Write, from_row: usize, to_row: usize, to_col: usize) -> io::Result<()> {
    if from_row > to_row {
        ansi::cursor_up(w, from_row - to_row)?;
    } else if from_row < to_row {
        ansi::cursor_down(w, to_row - from_row)?;
    }
    ansi::carriage_return(w)?;
    if to_col > 0 {
        ansi::cursor_right(w, to_col)?;
    }
    Ok(())
}
