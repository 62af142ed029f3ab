// SPDX-License-Identifier: MIT
//
// Display width helpers.
//
// Terminal columns are not bytes and not chars. A CJK ideograph takes two
// columns, a combining accent takes zero, and a grapheme cluster must never
// be split when a line is clipped at the right edge.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal columns.
///
/// # Examples
///
/// ```
/// use txted_term::width::string_width;
///
/// assert_eq!(string_width("hello"), 5);
/// assert_eq!(string_width("中文"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.width()
}

/// Longest prefix of `s` that fits in `cols` terminal columns.
///
/// Clips on grapheme boundaries. A wide grapheme that would straddle the
/// edge is dropped entirely rather than half-drawn.
#[must_use]
pub fn clip_to_width(s: &str, cols: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in s.grapheme_indices(true) {
        let w = grapheme.width();
        if used + w > cols {
            return &s[..idx];
        }
        used += w;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width() {
        assert_eq!(string_width("txted"), 5);
    }

    #[test]
    fn clip_shorter_is_identity() {
        assert_eq!(clip_to_width("abc", 10), "abc");
    }

    #[test]
    fn clip_exact() {
        assert_eq!(clip_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn clip_zero_cols() {
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn clip_never_splits_wide_char() {
        assert_eq!(clip_to_width("a中b", 2), "a");
        assert_eq!(clip_to_width("a中b", 3), "a中");
    }

    #[test]
    fn clip_keeps_combining_marks() {
        let s = "e\u{301}x";
        assert_eq!(clip_to_width(s, 1), "e\u{301}");
    }
}
