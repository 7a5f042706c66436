// SPDX-License-Identifier: MIT
//! Self-inverse character substitution for casual obfuscation
//!
//! ROT13 for ASCII letters, ROT5 for ASCII digits, and a `?`/`=` swap.
//! Applying [`obfuscate`] twice returns the original input exactly: 13 is
//! self-inverse mod 26, 5 is self-inverse mod 10, and the swap is an
//! involution. Everything else, including all non-ASCII code points, passes
//! through unchanged.
//!
//! This is not cryptographically secure; it only deters casual inspection.

/// Obfuscate a string with the ROT13/ROT5/swap substitution
pub fn obfuscate(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'a'..='z' => (b'a' + (c as u8 - b'a' + 13) % 26) as char,
            'A'..='Z' => (b'A' + (c as u8 - b'A' + 13) % 26) as char,
            '0'..='9' => (b'0' + (c as u8 - b'0' + 5) % 10) as char,
            '?' => '=',
            '=' => '?',
            other => other,
        })
        .collect()
}

/// Reverse [`obfuscate`]; identical because the transform is self-inverse
pub fn clarify(input: &str) -> String {
    obfuscate(input)
}

/// Option-aware variant: an absent value stays absent, never an empty string
pub fn obfuscate_opt(input: Option<&str>) -> Option<String> {
    input.map(obfuscate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_letters_by_13() {
        assert_eq!(obfuscate("abc"), "nop");
        assert_eq!(obfuscate("XYZ"), "KLM");
        assert_eq!(obfuscate("Hello"), "Uryyb");
    }

    #[test]
    fn test_rotates_digits_by_5() {
        assert_eq!(obfuscate("0123456789"), "5678901234");
    }

    #[test]
    fn test_swaps_question_mark_and_equals() {
        assert_eq!(obfuscate("a=b?"), "n?o=");
    }

    #[test]
    fn test_other_characters_pass_through() {
        assert_eq!(obfuscate(" .,;-_!"), " .,;-_!");
        assert_eq!(obfuscate("café 東京"), "pnsé 東京");
    }

    #[test]
    fn test_involution() {
        let samples = [
            "",
            "Hello, World! 123",
            "jo@x.com",
            "key=value?",
            "ünïcödé 日本語 🙂",
        ];
        for s in samples {
            assert_eq!(clarify(&obfuscate(s)), s);
            assert_eq!(obfuscate(&obfuscate(s)), s);
        }
    }

    #[test]
    fn test_none_maps_to_none() {
        assert_eq!(obfuscate_opt(None), None);
        assert_eq!(obfuscate_opt(Some("abc")).as_deref(), Some("nop"));
    }
}
