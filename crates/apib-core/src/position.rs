//! Source offset to line number resolution.

/// Returns the 1-based line containing the character at `offset`.
///
/// Counts `\n` characters among the first `offset` characters of `source`.
/// An offset past the end of the text resolves to the last line.
pub fn line_number(source: &str, offset: usize) -> usize {
    source.chars().take(offset).filter(|c| *c == '\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_character_is_line_one() {
        assert_eq!(line_number("abc\ndef", 0), 1);
    }

    #[test]
    fn offset_after_newline_is_next_line() {
        let text = "FORMAT: 1A\n\n# API\n";
        assert_eq!(line_number(text, 10), 1);
        assert_eq!(line_number(text, 11), 2);
        assert_eq!(line_number(text, 12), 3);
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        // "é" is two bytes but one character.
        let text = "é\nx";
        assert_eq!(line_number(text, 2), 2);
    }

    #[test]
    fn offset_past_end_is_clamped() {
        assert_eq!(line_number("a\nb", 100), 2);
        assert_eq!(line_number("", 5), 1);
    }

    proptest! {
        #[test]
        fn line_never_exceeds_line_count(text in "[a-z\n]{0,64}", offset in 0usize..80) {
            let line = line_number(&text, offset);
            prop_assert!(line >= 1);
            prop_assert!(line <= text.matches('\n').count() + 1);
        }

        #[test]
        fn line_is_monotonic_in_offset(text in "[a-z\n]{0,64}", a in 0usize..80, b in 0usize..80) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(line_number(&text, lo) <= line_number(&text, hi));
        }
    }
}
