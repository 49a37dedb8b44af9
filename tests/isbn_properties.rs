//! Property-based tests for ISBN validation.

use bookbridge::isbn::{
    self, extract_isbn, is_likely_isbn, isbn10_check_digit, isbn10_to_isbn13, isbn13_check_digit,
    IsbnFormat,
};
use proptest::prelude::*;

/// A correctly check-digited ISBN-13 with a bookland prefix.
fn valid_isbn13() -> impl Strategy<Value = String> {
    (prop_oneof![Just("978"), Just("979")], "[0-9]{9}").prop_map(|(prefix, body)| {
        let first_twelve = format!("{prefix}{body}");
        let check = isbn13_check_digit(&first_twelve).unwrap();
        format!("{first_twelve}{check}")
    })
}

/// A correctly check-digited ISBN-10 (possibly ending in `X`).
fn valid_isbn10() -> impl Strategy<Value = String> {
    "[0-9]{9}".prop_map(|body| {
        let check = isbn10_check_digit(&body).unwrap();
        format!("{body}{check}")
    })
}

proptest! {
    /// Any ISBN-13 with a correct check digit validates unchanged
    #[test]
    fn valid_isbn13_is_accepted(code in valid_isbn13()) {
        let result = isbn::validate(&code);
        prop_assert!(result.is_valid);
        prop_assert_eq!(result.format, Some(IsbnFormat::Isbn13));
        prop_assert_eq!(result.normalized_isbn.as_deref(), Some(code.as_str()));
        prop_assert!(result.error.is_none());
    }

    /// Any ISBN-10 with a correct check digit normalizes to its 978 form
    #[test]
    fn valid_isbn10_normalizes_to_isbn13(code in valid_isbn10()) {
        let result = isbn::validate(&code);
        prop_assert!(result.is_valid);
        prop_assert_eq!(result.format, Some(IsbnFormat::Isbn10));

        let expected = isbn10_to_isbn13(&code).unwrap();
        prop_assert!(expected.starts_with("978"));
        prop_assert_eq!(result.normalized_isbn, Some(expected));
    }

    /// Changing any single digit of a valid ISBN-13 is always detected
    #[test]
    fn single_digit_errors_are_detected(
        code in valid_isbn13(),
        position in 0usize..13,
        delta in 1u8..10,
    ) {
        let mut bytes = code.into_bytes();
        bytes[position] = b'0' + (bytes[position] - b'0' + delta) % 10;
        let corrupted = String::from_utf8(bytes).unwrap();

        let result = isbn::validate(&corrupted);
        prop_assert!(!result.is_valid);
        prop_assert!(result.normalized_isbn.is_none());
        prop_assert!(result.error.is_some());
    }

    /// Display formatting keeps the ISBN valid and uses 3-1-3-5-1 groups
    #[test]
    fn display_format_round_trips(code in valid_isbn13()) {
        let display = isbn::format_for_display(&code);
        let groups: Vec<usize> = display.split('-').map(str::len).collect();
        prop_assert_eq!(groups, vec![3, 1, 3, 5, 1]);

        let reparsed = isbn::validate(&display);
        prop_assert_eq!(reparsed.normalized_isbn, Some(code));
    }

    /// Every valid ISBN passes the cheap pre-filter, hyphenated or not
    #[test]
    fn valid_isbns_look_like_isbns(code13 in valid_isbn13(), code10 in valid_isbn10()) {
        prop_assert!(is_likely_isbn(&code13));
        prop_assert!(is_likely_isbn(&code10));
        prop_assert!(is_likely_isbn(&isbn::format_for_display(&code13)));
    }

    /// An ISBN-13 embedded in prose is found
    #[test]
    fn extract_finds_embedded_isbn13(
        code in valid_isbn13(),
        before in "[a-zA-Z ]{0,20}",
        after in "[a-zA-Z .]{0,20}",
    ) {
        let text = format!("{before} {code} {after}");
        prop_assert_eq!(extract_isbn(&text), Some(code));
    }

    /// Validation never panics on arbitrary input
    #[test]
    fn validate_never_panics(input in "\\PC{0,40}") {
        let result = isbn::validate(&input);
        prop_assert_eq!(result.is_valid, result.normalized_isbn.is_some());
        prop_assert_eq!(result.is_valid, result.error.is_none());
    }
}
