//! Wire shapes of the Open Library APIs.
//!
//! These mirror the JSON the service returns and are converted into the
//! crate's own types before leaving the client.

use crate::core::{BookSummary, ExternalBookRecord};

use serde::Deserialize;
use std::collections::HashMap;

/// Response of `/api/books?jscmd=data`: bibkey → record.
///
/// A bibkey missing from the map means the book is unknown.
pub type BooksResponse = HashMap<String, ExternalBookRecord>;

/// Response of `/search.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Total hits reported by the service.
    #[serde(default, rename = "numFound", alias = "num_found")]
    pub num_found: u64,

    /// The returned page of hits.
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// A single search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoc {
    /// Work key, e.g. `/works/OL1168083W`.
    #[serde(default)]
    pub key: Option<String>,

    /// Work title.
    #[serde(default)]
    pub title: Option<String>,

    /// Author display names.
    #[serde(default)]
    pub author_name: Vec<String>,

    /// Every ISBN attached to any edition of the work.
    #[serde(default)]
    pub isbn: Vec<String>,

    /// Year the work was first published.
    #[serde(default)]
    pub first_publish_year: Option<i32>,
}

impl From<SearchDoc> for BookSummary {
    fn from(doc: SearchDoc) -> Self {
        Self {
            title: doc.title.unwrap_or_default(),
            authors: doc.author_name,
            isbns: doc.isbn,
            publish_year: doc.first_publish_year,
            key: doc.key,
        }
    }
}
