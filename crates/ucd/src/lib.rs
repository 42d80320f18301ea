//! Codepoint property provider for the editor core.
//!
//! The width data comes from the statically linked `unicode-width` tables.
//! The engine never looks at these tables directly, it only consumes the
//! functions below.

use unicode_width::UnicodeWidthChar;

/// Coarse general category of a codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Control,
    Whitespace,
    Letter,
    Digit,
    Punctuation,
    Mark,
    Other,
}

pub fn category(ch: char) -> Category {
    if ch.is_control() {
        Category::Control
    } else if ch.is_whitespace() {
        Category::Whitespace
    } else if ch.is_alphabetic() {
        Category::Letter
    } else if ch.is_numeric() {
        Category::Digit
    } else if ch.is_ascii_punctuation() {
        Category::Punctuation
    } else if is_combining(ch) {
        Category::Mark
    } else {
        Category::Other
    }
}

/// Display width of a codepoint in terminal cells: 0, 1 or 2.
///
/// Control codes report 0 here; how they are rendered is up to the caller.
pub fn display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0).min(2)
}

/// Whether the codepoint occupies no cells of its own and attaches to the
/// previous character.
pub fn is_combining(ch: char) -> bool {
    !ch.is_control() && UnicodeWidthChar::width(ch) == Some(0)
}

/// Whether the codepoint has a visible rendering at all.
pub fn is_printable(ch: char) -> bool {
    !ch.is_control()
}

/// Simple uppercase mapping. Multi-codepoint expansions take the first
/// codepoint of the expansion.
pub fn to_uppercase(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}

/// Simple lowercase mapping, see [`to_uppercase`].
pub fn to_lowercase(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Properties for a raw codepoint. Out of range or surrogate values fall back
/// to an unassigned default.
pub fn codepoint_category(cp: u32) -> Category {
    match char::from_u32(cp) {
        Some(ch) => category(ch),
        None => Category::Other,
    }
}
