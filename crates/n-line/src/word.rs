//! Word motions — whitespace-delimited word navigation and deletion.
//!
//! Readline-style word handling for a single line of chars:
//!
//! | Function | Key | Description |
//! |----------|-----|-------------|
//! | [`word_left`] | `Alt+B`, `Ctrl+Left` | Back to start of previous word |
//! | [`word_right`] | `Alt+F`, `Ctrl+Right` | Forward past end of next word |
//! | [`kill_word_backward`] | `Ctrl+W`, `Alt+Backspace` | Delete back to start of previous word |
//! | [`kill_line_backward`] | `Ctrl+U` | Delete from line start to cursor |
//!
//! A word is a run of non-whitespace characters. Unlike Vim's small-word
//! motions there is no punctuation class: `hello.world` is one word, and
//! only Unicode whitespace separates words.
//!
//! All functions take a cursor in `0..=line.len()` and return one in the
//! same range.

/// Backward to the start of the previous word.
///
/// 1. Skip whitespace immediately left of the cursor.
/// 2. Skip the non-whitespace run before it.
#[must_use]
pub fn word_left(line: &[char], cursor: usize) -> usize {
    let mut idx = cursor.min(line.len());
    while idx > 0 && line[idx - 1].is_whitespace() {
        idx -= 1;
    }
    while idx > 0 && !line[idx - 1].is_whitespace() {
        idx -= 1;
    }
    idx
}

/// Forward to the end of the next word.
///
/// Mirror of [`word_left`]: skip whitespace, then skip the word, landing
/// on the first whitespace after it (or the end of the line).
#[must_use]
pub fn word_right(line: &[char], cursor: usize) -> usize {
    let mut idx = cursor.min(line.len());
    while idx < line.len() && line[idx].is_whitespace() {
        idx += 1;
    }
    while idx < line.len() && !line[idx].is_whitespace() {
        idx += 1;
    }
    idx
}

/// Delete `[word_left(cursor), cursor)` and return the new cursor.
pub fn kill_word_backward(line: &mut Vec<char>, cursor: usize) -> usize {
    let cursor = cursor.min(line.len());
    let start = word_left(line, cursor);
    line.drain(start..cursor);
    start
}

/// Delete `[0, cursor)` and return the new cursor (always 0).
pub fn kill_line_backward(line: &mut Vec<char>, cursor: usize) -> usize {
    line.drain(..cursor.min(line.len()));
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn text(line: &[char]) -> String {
        line.iter().collect()
    }

    // -- word_left / word_right ----------------------------------------------

    #[test]
    fn left_from_end_of_word() {
        let line = chars("hello brave world");
        assert_eq!(word_left(&line, line.len()), 12);
    }

    #[test]
    fn left_from_middle_of_word() {
        let line = chars("hello brave");
        assert_eq!(word_left(&line, 8), 6);
    }

    #[test]
    fn left_skips_trailing_whitespace() {
        let line = chars("hello   ");
        assert_eq!(word_left(&line, line.len()), 0);
    }

    #[test]
    fn left_at_start_stays() {
        let line = chars("hello");
        assert_eq!(word_left(&line, 0), 0);
    }

    #[test]
    fn left_punctuation_is_part_of_word() {
        let line = chars("cd ../src/main.rs");
        assert_eq!(word_left(&line, line.len()), 3);
    }

    #[test]
    fn right_from_start_of_word() {
        let line = chars("hello brave world");
        assert_eq!(word_right(&line, 6), 11);
    }

    #[test]
    fn right_from_whitespace() {
        let line = chars("hello brave world");
        assert_eq!(word_right(&line, 5), 11);
    }

    #[test]
    fn right_at_end_stays() {
        let line = chars("hello");
        assert_eq!(word_right(&line, 5), 5);
    }

    #[test]
    fn right_over_unicode_whitespace() {
        // U+3000 IDEOGRAPHIC SPACE separates words like ASCII space.
        let line = chars("日本\u{3000}語");
        assert_eq!(word_right(&line, 2), 4);
        assert_eq!(word_left(&line, 4), 3);
    }

    #[test]
    fn empty_line() {
        assert_eq!(word_left(&[], 0), 0);
        assert_eq!(word_right(&[], 0), 0);
    }

    #[test]
    fn motions_stay_in_bounds_for_every_cursor() {
        for s in ["", " ", "a", "  a  b  ", "hello brave world", "tab\tsep", "日本 語 🦀"] {
            let line = chars(s);
            for cursor in 0..=line.len() {
                let left = word_left(&line, cursor);
                assert!(left <= cursor, "{s:?} @ {cursor}");
                let right = word_right(&line, left);
                assert!(right <= line.len(), "{s:?} @ {cursor}");
                let right = word_right(&line, cursor);
                assert!(right >= cursor && right <= line.len(), "{s:?} @ {cursor}");
                assert!(word_left(&line, right) <= line.len());
            }
        }
    }

    // -- kills ---------------------------------------------------------------

    #[test]
    fn kill_word_repeatedly_empties_line() {
        let mut line = chars("hello brave world");
        let mut cursor = line.len();

        cursor = kill_word_backward(&mut line, cursor);
        assert_eq!((text(&line).as_str(), cursor), ("hello brave ", 12));

        cursor = kill_word_backward(&mut line, cursor);
        assert_eq!((text(&line).as_str(), cursor), ("hello ", 6));

        cursor = kill_word_backward(&mut line, cursor);
        assert_eq!((text(&line).as_str(), cursor), ("", 0));

        cursor = kill_word_backward(&mut line, cursor);
        assert_eq!((text(&line).as_str(), cursor), ("", 0));
    }

    #[test]
    fn kill_word_keeps_text_after_cursor() {
        let mut line = chars("hello brave world");
        let cursor = kill_word_backward(&mut line, 11);
        assert_eq!(text(&line), "hello  world");
        assert_eq!(cursor, 6);
    }

    #[test]
    fn kill_line_backward_from_middle() {
        let mut line = chars("hello brave world");
        let cursor = kill_line_backward(&mut line, 6);
        assert_eq!(text(&line), "brave world");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn kill_line_backward_at_start_is_noop() {
        let mut line = chars("abc");
        assert_eq!(kill_line_backward(&mut line, 0), 0);
        assert_eq!(text(&line), "abc");
    }
}
