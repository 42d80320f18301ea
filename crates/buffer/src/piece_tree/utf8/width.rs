use tessera_ucd as ucd;

use super::decode_at;
use crate::piece_tree::PieceTree;

/// Options for translating between byte columns and render columns.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub tabstop: u8,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions { tabstop: 8 }
    }
}

/// Render width of one codepoint at a render column.
///
/// Tabs advance to the next tab stop. In debug builds non printable
/// codepoints render as their escape form and take its width; in release
/// they take no room and render as a single space.
fn codepoint_width(ch: Option<char>, column: u64, options: &DisplayOptions) -> u64 {
    let tabstop = options.tabstop.max(1) as u64;
    match ch {
        Some('\t') => tabstop - column % tabstop,
        Some(ch) if ucd::is_printable(ch) => ucd::display_width(ch) as u64,
        Some(ch) => {
            if cfg!(debug_assertions) {
                ch.escape_debug().count() as u64
            } else {
                0
            }
        }
        None => {
            if cfg!(debug_assertions) {
                "\\xNN".len() as u64
            } else {
                0
            }
        }
    }
}

/// Accumulated render width of the row up to a byte column.
pub fn render_column(pt: &PieceTree, row: u64, byte_column: u64, options: &DisplayOptions) -> u64 {
    let start = pt.offset_at(row, 0);
    let end = start.saturating_add(byte_column).min(pt.len());

    let mut column = 0;
    let mut pos = start;
    while pos < end {
        let (ch, len) = decode_at(pt, pos);
        let len = len.max(1);
        if pos + len > end {
            // a trailing partial codepoint renders nothing
            break;
        }
        column += codepoint_width(ch, column, options);
        pos += len;
    }

    column
}

/// Largest byte column of the row whose accumulated render width does not
/// exceed the target. Inverse of [`render_column`].
pub fn byte_column(pt: &PieceTree, row: u64, target: u64, options: &DisplayOptions) -> u64 {
    let start = pt.offset_at(row, 0);
    let end = if row + 1 >= pt.line_count() {
        pt.len()
    } else {
        pt.offset_at(row + 1, 0)
    };

    let mut column = 0;
    let mut pos = start;
    while pos < end {
        let (ch, len) = decode_at(pt, pos);
        let len = len.max(1).min(end - pos);
        let width = codepoint_width(ch, column, options);
        if column + width > target {
            break;
        }
        column += width;
        pos += len;
    }

    pos - start
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PieceTree;

    fn options() -> DisplayOptions {
        DisplayOptions::default()
    }

    #[test]
    fn ascii_columns() {
        let mut pt = PieceTree::new();
        pt.insert(0, "abc").unwrap();

        assert_eq!(0, render_column(&pt, 0, 0, &options()));
        assert_eq!(1, render_column(&pt, 0, 1, &options()));
        assert_eq!(3, render_column(&pt, 0, 3, &options()));
        // byte columns past the row clamp
        assert_eq!(3, render_column(&pt, 0, 10, &options()));
    }

    #[test]
    fn wide_codepoint() {
        let mut pt = PieceTree::new();
        pt.insert(0, "😀").unwrap();

        assert_eq!(4, pt.len());
        assert_eq!(1, pt.line_count());
        assert_eq!(2, render_column(&pt, 0, 4, &options()));
    }

    #[test]
    fn east_asian_text() {
        let mut pt = PieceTree::new();
        pt.insert(0, "간a나").unwrap();

        assert_eq!(2, render_column(&pt, 0, 3, &options()));
        assert_eq!(3, render_column(&pt, 0, 4, &options()));
        assert_eq!(5, render_column(&pt, 0, 7, &options()));
    }

    #[test]
    fn tabs_advance_to_tab_stops() {
        let mut pt = PieceTree::new();
        pt.insert(0, "a\tb\tc").unwrap();

        assert_eq!(1, render_column(&pt, 0, 1, &options()));
        assert_eq!(8, render_column(&pt, 0, 2, &options()));
        assert_eq!(9, render_column(&pt, 0, 3, &options()));
        assert_eq!(16, render_column(&pt, 0, 4, &options()));

        let narrow = DisplayOptions { tabstop: 4 };
        assert_eq!(4, render_column(&pt, 0, 2, &narrow));
        assert_eq!(8, render_column(&pt, 0, 4, &narrow));
    }

    #[test]
    fn tabs_are_relative_to_the_row() {
        let mut pt = PieceTree::new();
        pt.insert(0, "abc\nx\ty").unwrap();

        // the tab on row 1 sees columns counted from the row start
        assert_eq!(8, render_column(&pt, 1, 2, &options()));
    }

    #[test]
    fn combining_marks_are_zero_width() {
        let mut pt = PieceTree::new();
        pt.insert(0, "a\u{0301}b").unwrap();

        assert_eq!(1, render_column(&pt, 0, 3, &options()));
        assert_eq!(2, render_column(&pt, 0, 4, &options()));
    }

    #[test]
    fn partial_codepoint_renders_nothing() {
        let mut pt = PieceTree::new();
        pt.insert(0, "a😀").unwrap();

        // byte column 3 splits the emoji
        assert_eq!(1, render_column(&pt, 0, 3, &options()));
        assert_eq!(3, render_column(&pt, 0, 5, &options()));
    }

    #[test]
    fn byte_column_inverts_render_column() {
        let mut pt = PieceTree::new();
        pt.insert(0, "a\t간b").unwrap();

        for byte in [0u64, 1, 2, 5, 6] {
            let render = render_column(&pt, 0, byte, &options());
            assert_eq!(byte, byte_column(&pt, 0, render, &options()));
        }
    }

    #[test]
    fn byte_column_stops_before_overflowing() {
        let mut pt = PieceTree::new();
        pt.insert(0, "a\tb").unwrap();

        // the tab would overflow a target in the middle of its span
        assert_eq!(1, byte_column(&pt, 0, 5, &options()));
        assert_eq!(2, byte_column(&pt, 0, 8, &options()));
        // targets past the row clamp to the row end
        assert_eq!(3, byte_column(&pt, 0, 100, &options()));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn escapes_in_debug_builds() {
        let mut pt = PieceTree::new();
        pt.insert(0, "a\u{1}b").unwrap();

        // '\u{1}' renders as its escape form
        let escape_len = '\u{1}'.escape_debug().count() as u64;
        assert_eq!(1 + escape_len, render_column(&pt, 0, 2, &options()));
    }
}
