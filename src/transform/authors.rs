//! Author name parsing.

use super::model::AuthorData;
use crate::core::AuthorEntry;

/// Splits a display name into given name and surname.
///
/// Rules, in order:
///
/// 1. `"Surname, Given"`: text before the first comma is the surname, the
///    rest the given name. With nothing after the comma, the pre-comma text
///    becomes the given name and the surname stays empty.
/// 2. Otherwise whitespace tokens decide: none gives `Unknown Author`, one
///    is a mononym with an empty surname, and with two or more the last
///    token is the surname.
///
/// `full_name` keeps the input as given.
pub fn parse_author_name(raw: &str) -> AuthorData {
    let (name, surname) = split_name(raw);
    AuthorData {
        name,
        surname,
        full_name: raw.to_string(),
        nationality: None,
    }
}

fn split_name(raw: &str) -> (String, String) {
    if let Some((before, after)) = raw.split_once(',') {
        let surname = before.trim();
        let given = after.trim();
        if given.is_empty() {
            return (surname.to_string(), String::new());
        }
        return (given.to_string(), surname.to_string());
    }

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match tokens.as_slice() {
        [] => ("Unknown".to_string(), "Author".to_string()),
        [single] => (single.to_string(), String::new()),
        [given @ .., last] => (given.join(" "), last.to_string()),
    }
}

/// Parses every named author entry, keeping source order.
///
/// Entries without a `name` field are skipped.
pub fn transform_authors(authors: &[AuthorEntry]) -> Vec<AuthorData> {
    authors
        .iter()
        .filter_map(|author| author.name.as_deref())
        .map(parse_author_name)
        .collect()
}
