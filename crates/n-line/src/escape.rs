//! Escape sequences — reading them off the wire and mapping them to edits.
//!
//! When the editor sees ESC (0x1B) it hands the byte source to
//! [`read_escape_sequence`], which collects the bytes that follow up to a
//! terminator. The collected identifier (without the ESC) goes to
//! [`decode_escape`], which knows the xterm/vt encodings of the editing
//! keys a prompt cares about.
//!
//! | Sequence(s) | Edit |
//! |-------------|------|
//! | `[D`, `OD` | [`Edit::Left`] |
//! | `[C`, `OC` | [`Edit::Right`] |
//! | `[H`, `[1~`, `[7~`, `OH` | [`Edit::Home`] |
//! | `[F`, `[4~`, `[8~`, `OF` | [`Edit::End`] |
//! | `[3~` | [`Edit::DeleteForward`] |
//! | `b`, `B`, `[1;5D`, `[5D` | [`Edit::WordLeft`] (Alt+B, Ctrl+Left) |
//! | `f`, `F`, `[1;5C`, `[5C` | [`Edit::WordRight`] (Alt+F, Ctrl+Right) |
//! | DEL, BS, `[3;3~`, `[8;3u`, `[127;3u` | [`Edit::KillWordBackward`] (Alt+Backspace) |
//!
//! Anything else is ignored.

use std::io::{self, Read};

use n_term::source::ByteSource;

use crate::line::{Edit, LineBuffer};

/// Longest escape sequence collected after ESC.
pub const MAX_SEQUENCE_LEN: usize = 16;

/// Read the bytes following an ESC up to and including a terminator.
///
/// An SS3 introducer (`O`) is a letter but not a terminator: the byte
/// after it is always taken too, so `ESC O H` reads as `"OH"`.
///
/// Stops after [`MAX_SEQUENCE_LEN`] bytes if no terminator shows up. End of
/// input is not an error: whatever was collected is returned.
///
/// # Errors
///
/// Propagates I/O errors from the source.
pub fn read_escape_sequence<R: Read>(source: &mut ByteSource<R>) -> io::Result<String> {
    let mut seq = Vec::with_capacity(MAX_SEQUENCE_LEN);
    while seq.len() < MAX_SEQUENCE_LEN {
        let Some(b) = source.read_byte()? else {
            break;
        };
        seq.push(b);
        let ss3_introducer = seq.len() == 1 && b == b'O';
        if is_terminator(b) && !ss3_introducer {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&seq).into_owned())
}

/// Whether `b` ends an escape sequence: `~`, DEL, a control char when
/// widened to a code point (C0 or C1), or an ASCII letter.
#[must_use]
pub const fn is_terminator(b: u8) -> bool {
    matches!(b, b'~' | 0x7F | 0x00..=0x1F | 0x80..=0x9F) || b.is_ascii_alphabetic()
}

/// Map an escape sequence identifier to the edit it stands for.
#[must_use]
pub fn decode_escape(seq: &str) -> Option<Edit> {
    let edit = match seq {
        "[D" | "OD" => Edit::Left,
        "[C" | "OC" => Edit::Right,
        "[H" | "[1~" | "[7~" | "OH" => Edit::Home,
        "[F" | "[4~" | "[8~" | "OF" => Edit::End,
        "[3~" => Edit::DeleteForward,
        "b" | "B" | "[1;5D" | "[5D" => Edit::WordLeft,
        "f" | "F" | "[1;5C" | "[5C" => Edit::WordRight,
        "\x7f" | "\x08" | "[3;3~" | "[8;3u" | "[127;3u" => Edit::KillWordBackward,
        _ => return None,
    };
    Some(edit)
}

/// Apply the edit an escape sequence stands for. Unknown sequences are a
/// no-op.
pub fn apply_escape_sequence(seq: &str, line: &mut LineBuffer) {
    if let Some(edit) = decode_escape(seq) {
        line.apply(edit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn applied(seq: &str, text: &str, cursor: usize) -> (String, usize) {
        let mut line = LineBuffer::with_cursor(text, cursor);
        apply_escape_sequence(seq, &mut line);
        (line.to_string(), line.cursor())
    }

    // -- Reader --------------------------------------------------------------

    #[test]
    fn read_alt_backspace_leaves_rest() {
        let mut src = ByteSource::new(&b"\x7fX"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "\x7f");
        assert_eq!(src.read_byte().unwrap(), Some(b'X'));
    }

    #[test]
    fn read_csi_u_leaves_rest() {
        let mut src = ByteSource::new(&b"[127;3uX"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "[127;3u");
        assert_eq!(src.read_byte().unwrap(), Some(b'X'));
    }

    #[test]
    fn read_tilde_terminated() {
        let mut src = ByteSource::new(&b"[3~rest"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "[3~");
    }

    #[test]
    fn read_ss3() {
        let mut src = ByteSource::new(&b"OH"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "OH");
    }

    #[test]
    fn read_ss3_takes_exactly_one_more_byte() {
        let mut src = ByteSource::new(&b"OFd"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "OF");
        assert_eq!(src.read_byte().unwrap(), Some(b'd'));
    }

    #[test]
    fn read_lone_alt_o_at_eof() {
        let mut src = ByteSource::new(&b"O"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "O");
        assert_eq!(decode_escape("O"), None);
    }

    #[test]
    fn read_other_letters_still_terminate_at_once() {
        let mut src = ByteSource::new(&b"bX"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "b");
        assert_eq!(src.read_byte().unwrap(), Some(b'X'));
    }

    #[test]
    fn read_eof_returns_partial() {
        let mut src = ByteSource::new(&b"[1;"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "[1;");
    }

    #[test]
    fn read_caps_at_max_len() {
        let mut src = ByteSource::new(&b"[11111111111111111111~"[..]);
        let seq = read_escape_sequence(&mut src).unwrap();
        assert_eq!(seq.len(), MAX_SEQUENCE_LEN);
        assert_eq!(src.read_byte().unwrap(), Some(b'1'));
    }

    #[test]
    fn read_stops_at_control_byte() {
        let mut src = ByteSource::new(&b"[1\r"[..]);
        assert_eq!(read_escape_sequence(&mut src).unwrap(), "[1\r");
    }

    #[test]
    fn terminators() {
        for b in [b'~', 0x7F, 0x00, 0x0D, 0x1F, 0x85, b'A', b'z'] {
            assert!(is_terminator(b), "{b:#x}");
        }
        for b in [b'[', b';', b'0', b'9', b' ', 0xA0, 0xC3] {
            assert!(!is_terminator(b), "{b:#x}");
        }
    }

    // -- Interpreter ---------------------------------------------------------

    #[test]
    fn home_and_end() {
        assert_eq!(applied("[H", "hello world", 5).1, 0);
        assert_eq!(applied("OF", "hello world", 2).1, 11);
    }

    #[test]
    fn home_and_end_from_any_cursor() {
        for cursor in 0..=5 {
            for seq in ["[H", "[1~", "[7~", "OH"] {
                assert_eq!(applied(seq, "hello", cursor).1, 0, "{seq}");
            }
            for seq in ["[F", "[4~", "[8~", "OF"] {
                assert_eq!(applied(seq, "hello", cursor).1, 5, "{seq}");
            }
        }
    }

    #[test]
    fn arrows() {
        assert_eq!(applied("[C", "hello", 1).1, 2);
        assert_eq!(applied("[D", "hello", 2).1, 1);
        assert_eq!(applied("OC", "hello", 5).1, 5);
        assert_eq!(applied("OD", "hello", 0).1, 0);
    }

    #[test]
    fn forward_delete() {
        assert_eq!(applied("[3~", "abc", 1), ("ac".into(), 1));
    }

    #[test]
    fn word_motion() {
        let text = "hello brave world";
        let (_, cursor) = applied("[1;5D", text, 17);
        assert_eq!(cursor, 12);
        let (_, cursor) = applied("b", text, cursor);
        assert_eq!(cursor, 6);
        let (_, cursor) = applied("f", text, cursor);
        assert_eq!(cursor, 11);
        let (_, cursor) = applied("[1;5C", text, cursor);
        assert_eq!(cursor, 17);
    }

    #[test]
    fn alt_backspace_variants() {
        for seq in ["\x7f", "\x08", "[127;3u", "[8;3u", "[3;3~"] {
            assert_eq!(
                applied(seq, "hello brave world", 17),
                ("hello brave ".into(), 12),
                "{seq:?}"
            );
        }
    }

    #[test]
    fn alt_backspace_twice() {
        let mut line = LineBuffer::from("hello brave world");
        apply_escape_sequence("\x7f", &mut line);
        apply_escape_sequence("\x08", &mut line);
        assert_eq!(line.to_string(), "hello ");
        assert_eq!(line.cursor(), 6);
    }

    #[test]
    fn unknown_sequence_is_noop() {
        assert_eq!(applied("[A", "abc", 1), ("abc".into(), 1));
        assert_eq!(applied("[200~", "abc", 1), ("abc".into(), 1));
        assert_eq!(decode_escape(""), None);
    }
}
