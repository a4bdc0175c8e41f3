// Chunk: docs/chunks/grapheme_cluster_awareness - Grapheme cluster boundary helpers

//! Grapheme cluster boundaries expressed in UTF-16 offsets.
//!
//! The buffer addresses code units, but cursor movement and backspace should
//! step over whole user-perceived characters:
//!
//! - ZWJ emoji sequences: 👨‍👩‍👧‍👦 (11 code units)
//! - Combining sequences: e + U+0301
//! - Regional indicator pairs: 🇺🇸 (4 code units)
//!
//! All functions take the text of a single line and an offset relative to it.

use unicode_segmentation::UnicodeSegmentation;

/// Iterates grapheme start offsets (UTF-16) in `text`, followed by the end offset.
fn boundaries(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut offset = 0;
    let starts = text.graphemes(true).map(move |g| {
        let start = offset;
        offset += g.encode_utf16().count();
        start
    });
    starts.chain(std::iter::once(crate::utf16::len_utf16(text)))
}

/// Returns the grapheme boundary strictly before `offset`, or 0.
///
/// If `offset` is inside a cluster, returns the start of that cluster.
pub fn grapheme_boundary_left(text: &str, offset: usize) -> usize {
    if offset == 0 || text.is_empty() {
        return 0;
    }

    // ASCII before the offset is always its own grapheme, unless it is the
    // '\n' of a "\r\n" pair.
    if text.is_ascii() {
        let bytes = text.as_bytes();
        let offset = offset.min(bytes.len());
        if offset >= 2 && bytes[offset - 1] == b'\n' && bytes[offset - 2] == b'\r' {
            return offset - 2;
        }
        return offset - 1;
    }

    let mut result = 0;
    for start in boundaries(text) {
        if start < offset {
            result = start;
        } else {
            break;
        }
    }
    result
}

/// Returns the grapheme boundary strictly after `offset`, or the text length.
pub fn grapheme_boundary_right(text: &str, offset: usize) -> usize {
    let len = crate::utf16::len_utf16(text);
    if offset >= len {
        return len;
    }

    boundaries(text).find(|&b| b > offset).unwrap_or(len)
}

/// Returns true if `offset` falls on a grapheme cluster boundary.
pub fn is_grapheme_boundary(text: &str, offset: usize) -> bool {
    if offset == 0 {
        return true;
    }
    boundaries(text).any(|b| b == offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_boundaries() {
        assert_eq!(grapheme_boundary_left("hello", 0), 0);
        assert_eq!(grapheme_boundary_left("hello", 3), 2);
        assert_eq!(grapheme_boundary_right("hello", 0), 1);
        assert_eq!(grapheme_boundary_right("hello", 5), 5);
    }

    #[test]
    fn test_crlf_is_one_grapheme() {
        assert_eq!(grapheme_boundary_left("a\r\n", 3), 1);
        assert_eq!(grapheme_boundary_right("a\r\n", 1), 3);
    }

    #[test]
    fn test_surrogate_pair() {
        // "a😀b": a=0, 😀=1..3, b=3
        assert_eq!(grapheme_boundary_left("a😀b", 3), 1);
        assert_eq!(grapheme_boundary_right("a😀b", 1), 3);
        assert!(!is_grapheme_boundary("a😀b", 2));
        assert!(is_grapheme_boundary("a😀b", 3));
    }

    #[test]
    fn test_zwj_emoji() {
        let text = "a👨‍👩‍👧‍👦b";
        let emoji_units = "👨‍👩‍👧‍👦".encode_utf16().count();
        assert_eq!(grapheme_boundary_right(text, 1), 1 + emoji_units);
        assert_eq!(grapheme_boundary_left(text, 1 + emoji_units), 1);
        assert_eq!(grapheme_boundary_left(text, 4), 1);
    }

    #[test]
    fn test_combining_sequence() {
        let text = "ae\u{0301}b";
        assert_eq!(grapheme_boundary_left(text, 3), 1);
        assert_eq!(grapheme_boundary_right(text, 1), 3);
    }

    #[test]
    fn test_regional_indicator_pair() {
        let text = "a🇺🇸b";
        assert_eq!(grapheme_boundary_right(text, 1), 5);
        assert_eq!(grapheme_boundary_left(text, 5), 1);
    }
}
