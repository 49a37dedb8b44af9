//! The loosely-structured book record returned by external sources.
//!
//! Everything here is optional: bibliographic services return sparse
//! records, and list entries arrive either as plain strings or as
//! `{ "name": ... }` objects depending on the endpoint. These types accept
//! both shapes so the transformer can work from one representation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A raw book record as returned by an external bibliographic service.
///
/// Decoding never fails on a single odd field: a value of the wrong shape
/// reads as absent and a malformed list entry is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalBookRecord {
    /// Canonical URL of the record on the source.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source-specific record key, e.g. `/books/OL7353617M`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Main title.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Subtitle.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Credited authors, in source order.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<AuthorEntry>,

    /// Subject headings.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<NamedEntry>,

    /// Places the book is about.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub subject_places: Vec<NamedEntry>,

    /// Periods the book is about.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub subject_times: Vec<NamedEntry>,

    /// People the book is about.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub subject_people: Vec<NamedEntry>,

    /// Publishers.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub publishers: Vec<NamedEntry>,

    /// Places of publication.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub publish_places: Vec<NamedEntry>,

    /// Free-form publication date ("1950", "June 1950", "2003-03-01", ...).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,

    /// Language references such as `/languages/eng`.
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageRef>,

    /// Page count.
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_pages: Option<u32>,

    /// Binding, e.g. "Paperback".
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub physical_format: Option<String>,

    /// Dimensions as free text, e.g. "7 x 4.2 x 0.7 inches".
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub physical_dimensions: Option<String>,

    /// Weight as free text, e.g. "4.8 ounces".
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Cover image URLs.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverUrls>,

    /// Description or blurb.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<TextValue>,

    /// Known identifiers for this edition.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Identifiers>,
}

/// Decodes an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decodes a list, dropping entries that do not fit `T`.
///
/// A lone value where a list was expected is read as a one-element list.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Decodes a count given either as a number or as a numeric string.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count)
}

/// An author credit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// Display name exactly as the source has it.
    #[serde(default)]
    pub name: Option<String>,
    /// Link to the author page, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AuthorEntry {
    /// Creates an author entry with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: None,
        }
    }
}

/// A list entry that may be a bare string or an object with a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedEntry {
    /// `"Fiction"`
    Plain(String),
    /// `{ "name": "Fiction", "url": "..." }`
    Object {
        /// Display name.
        #[serde(default)]
        name: Option<String>,
        /// Link, when present.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl NamedEntry {
    /// Returns the display name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Plain(name) => Some(name),
            Self::Object { name, .. } => name.as_deref(),
        }
    }
}

impl From<&str> for NamedEntry {
    fn from(name: &str) -> Self {
        Self::Plain(name.to_string())
    }
}

/// A language reference: `{ "key": "/languages/eng" }` or a bare key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageRef {
    /// `"/languages/eng"`
    Plain(String),
    /// `{ "key": "/languages/eng" }`
    Object {
        /// Language key path.
        #[serde(default)]
        key: Option<String>,
    },
}

impl LanguageRef {
    /// Returns the key path, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Plain(key) => Some(key),
            Self::Object { key } => key.as_deref(),
        }
    }
}

/// A text field that may be a bare string or `{ "type": .., "value": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    /// Bare string.
    Plain(String),
    /// Typed text block.
    Typed {
        /// Content type, usually `/type/text`.
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        /// The text itself.
        value: String,
    },
}

impl TextValue {
    /// Returns the text content.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(value) | Self::Typed { value, .. } => value,
        }
    }
}

/// Small/medium/large cover image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverUrls {
    /// Thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    /// Medium image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    /// Full-size image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

impl CoverUrls {
    /// Returns `true` if no size is present.
    pub fn is_empty(&self) -> bool {
        self.small.is_none() && self.medium.is_none() && self.large.is_none()
    }
}

/// Identifiers known for an edition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiers {
    /// ISBN-10 values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isbn_10: Vec<String>,
    /// ISBN-13 values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isbn_13: Vec<String>,
    /// Source edition identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openlibrary: Vec<String>,
    /// Library of Congress control numbers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lccn: Vec<String>,
    /// OCLC numbers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oclc: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_record() {
        let record: ExternalBookRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ExternalBookRecord::default());
    }

    #[test]
    fn test_named_entries_accept_both_shapes() {
        let json = r#"{
            "subjects": ["Fiction", {"name": "Dystopias", "url": "https://example.org/s"}],
            "publishers": [{"name": "Signet Classic"}]
        }"#;

        let record: ExternalBookRecord = serde_json::from_str(json).unwrap();

        let subjects: Vec<_> = record.subjects.iter().filter_map(NamedEntry::name).collect();
        assert_eq!(subjects, vec!["Fiction", "Dystopias"]);
        assert_eq!(record.publishers[0].name(), Some("Signet Classic"));
    }

    #[test]
    fn test_description_accepts_both_shapes() {
        let plain: ExternalBookRecord =
            serde_json::from_str(r#"{"description": "A novel."}"#).unwrap();
        assert_eq!(plain.description.unwrap().as_str(), "A novel.");

        let typed: ExternalBookRecord = serde_json::from_str(
            r#"{"description": {"type": "/type/text", "value": "A novel."}}"#,
        )
        .unwrap();
        assert_eq!(typed.description.unwrap().as_str(), "A novel.");
    }

    #[test]
    fn test_language_refs() {
        let record: ExternalBookRecord = serde_json::from_str(
            r#"{"languages": [{"key": "/languages/eng"}, "/languages/fre"]}"#,
        )
        .unwrap();
        assert_eq!(record.languages[0].key(), Some("/languages/eng"));
        assert_eq!(record.languages[1].key(), Some("/languages/fre"));
    }

    #[test]
    fn test_odd_fields_read_as_absent() {
        let json = r#"{
            "title": "1984",
            "subtitle": 42,
            "number_of_pages": "328",
            "subjects": ["Fiction", 7, {"name": 3}, {"name": "Dystopias"}],
            "languages": [null, {"key": "/languages/eng"}],
            "publishers": "Signet Classic",
            "cover": "not-an-object"
        }"#;

        let record: ExternalBookRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title.as_deref(), Some("1984"));
        assert!(record.subtitle.is_none());
        assert_eq!(record.number_of_pages, Some(328));
        let subjects: Vec<_> = record.subjects.iter().filter_map(NamedEntry::name).collect();
        assert_eq!(subjects, vec!["Fiction", "Dystopias"]);
        assert_eq!(record.languages.len(), 1);
        assert_eq!(record.publishers[0].name(), Some("Signet Classic"));
        assert!(record.cover.is_none());
    }

    #[test]
    fn test_page_count_shapes() {
        let parse = |json: &str| -> Option<u32> {
            serde_json::from_str::<ExternalBookRecord>(json)
                .unwrap()
                .number_of_pages
        };

        assert_eq!(parse(r#"{"number_of_pages": 328}"#), Some(328));
        assert_eq!(parse(r#"{"number_of_pages": " 96 "}"#), Some(96));
        assert_eq!(parse(r#"{"number_of_pages": "unknown"}"#), None);
        assert_eq!(parse(r#"{"number_of_pages": -1}"#), None);
        assert_eq!(parse(r#"{"number_of_pages": null}"#), None);
    }

    #[test]
    fn test_full_data_record() {
        let json = r#"{
            "url": "https://openlibrary.org/books/OL1M/1984",
            "key": "/books/OL1M",
            "title": "1984",
            "authors": [{"url": "https://openlibrary.org/authors/OL1A", "name": "George Orwell"}],
            "number_of_pages": 328,
            "weight": "6.4 ounces",
            "publish_date": "July 1, 1950",
            "cover": {
                "small": "https://covers.openlibrary.org/b/id/1-S.jpg",
                "medium": "https://covers.openlibrary.org/b/id/1-M.jpg",
                "large": "https://covers.openlibrary.org/b/id/1-L.jpg"
            },
            "identifiers": {"isbn_13": ["9780451524935"], "isbn_10": ["0451524934"]}
        }"#;

        let record: ExternalBookRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title.as_deref(), Some("1984"));
        assert_eq!(record.authors[0].name.as_deref(), Some("George Orwell"));
        assert_eq!(record.number_of_pages, Some(328));
        assert!(!record.cover.as_ref().unwrap().is_empty());
        assert_eq!(
            record.identifiers.unwrap().isbn_13,
            vec!["9780451524935".to_string()]
        );
    }
}
