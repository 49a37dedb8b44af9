//! Outbound result contracts.
//!
//! Lookup-style operations report to the controller layer through flat
//! result objects: `{ success, book | books, error, statusCode }`. Callers
//! branch on `success` and never need transport detail beyond the status
//! code. Internally the library works with `Result<_, LookupError>` and
//! converts at the boundary.

use crate::core::error::LookupError;
use crate::core::types::ExternalBookRecord;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a single-ISBN lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLookup {
    /// Whether a record was found.
    pub success: bool,

    /// The raw record, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<ExternalBookRecord>,

    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Status code associated with the failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl BookLookup {
    /// Creates a successful lookup.
    pub fn found(book: ExternalBookRecord) -> Self {
        Self {
            success: true,
            book: Some(book),
            error: None,
            status_code: None,
        }
    }

    /// Creates a failed lookup from an error.
    pub fn failed(error: &LookupError) -> Self {
        Self {
            success: false,
            book: None,
            error: Some(error.to_string()),
            status_code: error.status_code(),
        }
    }

    /// Returns `true` if the lookup failed because the record does not exist.
    pub fn is_not_found(&self) -> bool {
        !self.success && self.status_code == Some(404)
    }
}

impl From<Result<ExternalBookRecord, LookupError>> for BookLookup {
    fn from(result: Result<ExternalBookRecord, LookupError>) -> Self {
        match result {
            Ok(book) => Self::found(book),
            Err(e) => Self::failed(&e),
        }
    }
}

/// Per-input results of a batch lookup, keyed by the caller's original string.
pub type BatchLookup = HashMap<String, BookLookup>;

/// Minimal summary of a title-search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// Title as listed by the source.
    pub title: String,
    /// Author display names.
    #[serde(default)]
    pub authors: Vec<String>,
    /// All ISBNs the source lists for the work.
    #[serde(default)]
    pub isbns: Vec<String>,
    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
    /// Source-specific work key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Result of a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLookup {
    /// Whether the search completed.
    pub success: bool,

    /// Hits, on success (possibly empty).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<BookSummary>>,

    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Status code associated with the failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl SearchLookup {
    /// Creates a successful search result.
    pub fn found(books: Vec<BookSummary>) -> Self {
        Self {
            success: true,
            books: Some(books),
            error: None,
            status_code: None,
        }
    }

    /// Creates a failed search result from an error.
    pub fn failed(error: &LookupError) -> Self {
        Self {
            success: false,
            books: None,
            error: Some(error.to_string()),
            status_code: error.status_code(),
        }
    }
}

impl From<Result<Vec<BookSummary>, LookupError>> for SearchLookup {
    fn from(result: Result<Vec<BookSummary>, LookupError>) -> Self {
        match result {
            Ok(books) => Self::found(books),
            Err(e) => Self::failed(&e),
        }
    }
}

/// Result of a source health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the source answered.
    pub available: bool,
    /// Round-trip time of the probe in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Failure reason when unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    /// Creates an available status.
    pub fn available(response_time_ms: u64) -> Self {
        Self {
            available: true,
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    /// Creates an unavailable status.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            available: false,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::IsbnError;

    #[test]
    fn test_failed_lookup_serializes_contract_shape() {
        let lookup = BookLookup::failed(&LookupError::not_found("Open Library"));
        let json = serde_json::to_value(&lookup).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Book not found in Open Library",
                "statusCode": 404
            })
        );
        assert!(lookup.is_not_found());
    }

    #[test]
    fn test_network_failure_has_no_status_code() {
        let lookup = BookLookup::failed(&LookupError::network("refused"));
        assert!(lookup.status_code.is_none());
        assert_eq!(
            lookup.error.as_deref(),
            Some("Network error - please check your internet connection")
        );
    }

    #[test]
    fn test_lookup_from_result() {
        let ok: BookLookup = Ok(ExternalBookRecord::default()).into();
        assert!(ok.success);
        assert!(ok.book.is_some());

        let err: BookLookup = Err(LookupError::from(IsbnError::IsbnRequired)).into();
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("Invalid ISBN: ISBN is required"));
    }

    #[test]
    fn test_search_failure() {
        let search = SearchLookup::failed(&LookupError::TitleRequired);
        assert!(!search.success);
        assert!(search.books.is_none());
        assert_eq!(search.error.as_deref(), Some("Title is required for search"));
    }

    #[test]
    fn test_health_status() {
        let up = HealthStatus::available(42);
        assert!(up.available);
        assert_eq!(up.response_time_ms, Some(42));

        let down = HealthStatus::unavailable("timed out");
        assert!(!down.available);
        assert_eq!(down.error.as_deref(), Some("timed out"));
    }
}
