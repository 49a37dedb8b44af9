//! Raw ISBN input cleanup.

use crate::core::error::{IsbnError, IsbnResult};

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading "ISBN", "ISBN-10:" or "ISBN 13" labels copied along with the number.
///
/// A spaced `10`/`13` only counts as part of the label when a colon or
/// whitespace follows it, so `ISBN 1034567890` keeps its leading digits.
static ISBN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^isbn(?:-1[03]|[\s-]*1[03](?:\s*:|\s+))?\s*:?").expect("valid label pattern")
});

/// Strips separators and noise from a raw ISBN string.
///
/// Surrounding whitespace and an optional leading `ISBN` label are removed,
/// then every character that is not ASCII alphanumeric (hyphens, spaces,
/// dots, ...). A lowercase `x` is upper-cased. Letters other than `X` are
/// kept so that validation can report them instead of silently dropping
/// them.
///
/// # Errors
///
/// - [`IsbnError::EmptyInput`] if the input is blank.
/// - [`IsbnError::NoValidCharacters`] if nothing survives the stripping.
pub fn normalize(raw: &str) -> IsbnResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IsbnError::EmptyInput);
    }

    let unlabeled = ISBN_LABEL.replace(trimmed, "");

    let normalized: String = unlabeled
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| if c == 'x' { 'X' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err(IsbnError::NoValidCharacters);
    }

    Ok(normalized)
}

/// Cheap pre-filter: does this look like an ISBN, ignoring the checksum?
///
/// True iff, after removing hyphens and whitespace, the remainder is nine
/// digits plus a digit or `X`, or exactly thirteen digits.
pub fn is_likely_isbn(raw: &str) -> bool {
    let compact: Vec<u8> = raw
        .bytes()
        .filter(|b| *b != b'-' && !b.is_ascii_whitespace())
        .collect();

    match compact.len() {
        10 => {
            compact[..9].iter().all(u8::is_ascii_digit)
                && (compact[9].is_ascii_digit() || compact[9] == b'X' || compact[9] == b'x')
        }
        13 => compact.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
