//! ISBN check digit arithmetic.
//!
//! All functions here operate on ASCII strings that have already been
//! normalized; they return `None` rather than erroring when handed input
//! of the wrong shape.

/// Numeric value of an ISBN-10 character (`X` is ten).
fn isbn10_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'X' | b'x' => Some(10),
        _ => None,
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if the 10-character ISBN has a valid checksum.
///
/// Position *i* (1-indexed) is weighted `11 - i`; the weighted sum must be
/// divisible by 11.
pub fn isbn10_checksum_valid(isbn10: &str) -> bool {
    let bytes = isbn10.as_bytes();
    if bytes.len() != 10 {
        return false;
    }

    let mut sum = 0u32;
    for (i, &b) in bytes.iter().enumerate() {
        // `X` is only a legal value in the check position.
        let value = match (i, isbn10_value(b)) {
            (9, Some(v)) => v,
            (_, Some(v)) if v < 10 => v,
            _ => return false,
        };
        sum += value * (10 - i as u32);
    }

    sum % 11 == 0
}

/// Computes the ISBN-10 check character for nine leading digits.
pub fn isbn10_check_digit(first_nine: &str) -> Option<char> {
    if first_nine.len() != 9 || !all_digits(first_nine) {
        return None;
    }

    let sum: u32 = first_nine
        .bytes()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * (10 - i as u32))
        .sum();

    match (11 - sum % 11) % 11 {
        10 => Some('X'),
        d => char::from_digit(d, 10),
    }
}

/// Computes the ISBN-13 check digit for twelve leading digits.
///
/// Even 0-indexed positions weigh 1, odd ones weigh 3; the check digit is
/// `(10 - sum mod 10) mod 10`.
pub fn isbn13_check_digit(first_twelve: &str) -> Option<char> {
    if first_twelve.len() != 12 || !all_digits(first_twelve) {
        return None;
    }

    let sum: u32 = first_twelve
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let weight = if i % 2 == 0 { 1 } else { 3 };
            u32::from(b - b'0') * weight
        })
        .sum();

    char::from_digit((10 - sum % 10) % 10, 10)
}

/// Returns `true` if the 13-digit ISBN has a valid check digit.
pub fn isbn13_checksum_valid(isbn13: &str) -> bool {
    if isbn13.len() != 13 || !all_digits(isbn13) {
        return false;
    }
    isbn13_check_digit(&isbn13[..12]) == isbn13[12..].chars().next()
}

/// Builds the `978`-prefixed ISBN-13 for a checksum-valid ISBN-10.
///
/// The ISBN-10 check character is dropped and a fresh ISBN-13 check digit
/// computed. Returns `None` if the input is not a valid ISBN-10.
pub fn isbn10_to_isbn13(isbn10: &str) -> Option<String> {
    if !isbn10_checksum_valid(isbn10) {
        return None;
    }

    let mut isbn13 = String::with_capacity(13);
    isbn13.push_str("978");
    isbn13.push_str(&isbn10[..9]);
    let check = isbn13_check_digit(&isbn13)?;
    isbn13.push(check);
    Some(isbn13)
}

/// Builds the ISBN-10 for a `978`-prefixed ISBN-13.
///
/// `979` ISBNs have no ISBN-10 form and yield `None`.
pub fn isbn13_to_isbn10(isbn13: &str) -> Option<String> {
    if !isbn13_checksum_valid(isbn13) || !isbn13.starts_with("978") {
        return None;
    }

    let body = &isbn13[3..12];
    let check = isbn10_check_digit(body)?;
    let mut isbn10 = String::with_capacity(10);
    isbn10.push_str(body);
    isbn10.push(check);
    Some(isbn10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn10_checksum() {
        assert!(isbn10_checksum_valid("0451524934"));
        assert!(isbn10_checksum_valid("043942089X"));
        assert!(isbn10_checksum_valid("043942089x"));
        assert!(!isbn10_checksum_valid("0451524935"));
        // X is not allowed before the check position
        assert!(!isbn10_checksum_valid("X451524934"));
        assert!(!isbn10_checksum_valid("045152493"));
    }

    #[test]
    fn test_isbn10_check_digit() {
        assert_eq!(isbn10_check_digit("045152493"), Some('4'));
        assert_eq!(isbn10_check_digit("043942089"), Some('X'));
        assert_eq!(isbn10_check_digit("04515249"), None);
        assert_eq!(isbn10_check_digit("04515249a"), None);
    }

    #[test]
    fn test_isbn13_check_digit() {
        assert_eq!(isbn13_check_digit("978045152493"), Some('5'));
        assert_eq!(isbn13_check_digit("978316148410"), Some('0'));
        assert_eq!(isbn13_check_digit("97804515249"), None);
    }

    #[test]
    fn test_isbn13_checksum() {
        assert!(isbn13_checksum_valid("9780451524935"));
        assert!(isbn13_checksum_valid("9783161484100"));
        assert!(!isbn13_checksum_valid("9780451524934"));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            isbn10_to_isbn13("0451524934").as_deref(),
            Some("9780451524935")
        );
        assert_eq!(
            isbn10_to_isbn13("043942089X").as_deref(),
            Some("9780439420891")
        );
        assert_eq!(isbn10_to_isbn13("0451524935"), None);

        assert_eq!(
            isbn13_to_isbn10("9780451524935").as_deref(),
            Some("0451524934")
        );
        assert_eq!(
            isbn13_to_isbn10("9780439420891").as_deref(),
            Some("043942089X")
        );
        assert_eq!(isbn13_to_isbn10("9791032305690"), None);
    }
}
