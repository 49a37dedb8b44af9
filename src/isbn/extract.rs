//! Heuristic ISBN extraction from free text.

use crate::isbn::validator::Isbn;

use once_cell::sync::Lazy;
use regex::Regex;

// Digit runs bounded by non-digits; a 10-run never matches inside a 13-run.
static ISBN13_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(\d{13})(?:\D|$)").expect("valid ISBN-13 pattern"));
static ISBN10_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(\d{9}[\dXx])(?:\D|$)").expect("valid ISBN-10 pattern"));

fn first_run<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Finds an ISBN in free text and returns its 13-digit form.
///
/// The first 13-digit run wins when it validates; otherwise the first
/// 10-character run (nine digits plus a digit or `X`) is tried and
/// converted. Returns `None` when neither candidate validates.
pub fn extract_isbn(text: &str) -> Option<String> {
    let candidate13 = first_run(&ISBN13_RUN, text);
    let candidate10 = first_run(&ISBN10_RUN, text);

    candidate13
        .and_then(|c| Isbn::parse(c).ok())
        .or_else(|| candidate10.and_then(|c| Isbn::parse(c).ok()))
        .map(Isbn::into_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_isbn13() {
        assert_eq!(
            extract_isbn("Old: 0451524934 New: 9780451524935").as_deref(),
            Some("9780451524935")
        );
    }

    #[test]
    fn test_falls_back_to_isbn10() {
        assert_eq!(
            extract_isbn("Paperback edition, ISBN 0451524934, 1961").as_deref(),
            Some("9780451524935")
        );
        assert_eq!(
            extract_isbn("isbn:043942089X").as_deref(),
            Some("9780439420891")
        );
    }

    #[test]
    fn test_invalid_isbn13_falls_back_to_isbn10() {
        assert_eq!(
            extract_isbn("9780451524934 or 0451524934").as_deref(),
            Some("9780451524935")
        );
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(extract_isbn(""), None);
        assert_eq!(extract_isbn("no numbers here"), None);
        assert_eq!(extract_isbn("phone 555-1234"), None);
        assert_eq!(extract_isbn("9780451524934"), None);
    }

    #[test]
    fn test_ten_run_not_taken_from_longer_number() {
        assert_eq!(extract_isbn("ref 04515249340000"), None);
    }
}
