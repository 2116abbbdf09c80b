//! The fixed character set the glyph atlas rasterizes. Any code point
//! outside this set is a rendering-side fallback to slot 0 — the screen
//! model itself still stores the original code point verbatim.

/// Digits, lowercase, uppercase, space, and punctuation, in the order the
/// original `rbtty` charset literal lists them.
pub const CHARSET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z', ' ', '&', '~', '"', '#', '\'', '{', '(', '[', '-', '|', '`', '_',
    '\\', '^', '@', ')', ']', '=', '}', '+', '$', '%', '*', ',', '?', ';', '.', ':', '/', '!',
    '<', '>',
];

/// Index within [`CHARSET`] used for any code point not present in it.
pub const FALLBACK_SLOT: usize = 0;

/// Returns the index of `c` within [`CHARSET`], or [`FALLBACK_SLOT`] if `c`
/// is not covered.
#[must_use]
pub fn slot_for(c: char) -> usize {
    CHARSET.iter().position(|&ch| ch == c).unwrap_or(FALLBACK_SLOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_matches_literal_length() {
        // The spec's prose rounds this to "~96"; the literal charset it
        // transcribes (digits + lower + upper + space + punctuation) is 95.
        assert_eq!(CHARSET.len(), 95);
    }

    #[test]
    fn charset_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for &c in CHARSET {
            assert!(seen.insert(c), "duplicate char in charset: {c:?}");
        }
    }

    #[test]
    fn slot_for_known_char() {
        assert_eq!(slot_for('0'), 0);
        assert_eq!(slot_for('>'), CHARSET.len() - 1);
    }

    #[test]
    fn slot_for_unknown_char_falls_back() {
        assert_eq!(slot_for('\u{1F600}'), FALLBACK_SLOT);
    }
}
