//! Canonical book representation produced by the transformer.

use crate::core::CoverUrls;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized book record, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedBookData {
    /// Normalized 13-digit ISBN.
    pub isbn_code: String,

    /// Title, never empty.
    pub title: String,

    /// Subtitle, when the source has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Authors in source order.
    #[serde(default)]
    pub authors: Vec<AuthorData>,

    /// Deduplicated categories in first-seen order.
    #[serde(default)]
    pub categories: Vec<CategoryData>,

    /// Ordinal parsed from the edition name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_number: Option<u32>,

    /// Publication date, day 1 when only the month is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_date: Option<NaiveDate>,

    /// Publisher names; absent when the source lists none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishers: Option<Vec<String>>,

    /// Page count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    /// Language name, or the raw code when it is not in the known table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Cover image URLs by size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_urls: Option<CoverUrls>,

    /// Plain-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Binding, e.g. `Paperback`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_format: Option<String>,

    /// Weight as the source spelled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Dimensions as the source spelled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

/// A parsed author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorData {
    /// Given name(s).
    pub name: String,
    /// Family name; empty for mononyms.
    pub surname: String,
    /// The name exactly as the source spelled it.
    pub full_name: String,
    /// Never supplied by the external source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

/// The kind of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Taken from the record's subjects.
    Subject,
    /// Taken from the record's subject places or times.
    Topic,
}

impl CategoryType {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Topic => "topic",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryData {
    /// Display name.
    pub name: String,
    /// Where the category came from.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl CategoryData {
    /// Creates a category.
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            name: name.into(),
            category_type,
        }
    }
}

/// A light canonical preview built from a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPreview {
    /// First listed ISBN that validates, in 13-digit form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn_code: Option<String>,

    /// Title, never empty.
    pub title: String,

    /// Parsed author names.
    #[serde(default)]
    pub authors: Vec<AuthorData>,

    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
}
