//! Mock book source for testing.
//!
//! This module provides a configurable in-memory source that can stand in
//! for Open Library in tests, simulating found records, failures and
//! latency without any network access.

use crate::core::{
    BookLookup, BookSource, BookSummary, ExternalBookRecord, HealthStatus, LookupError,
    SearchLookup,
};
use crate::isbn::Isbn;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// A mock book source for testing purposes.
///
/// Records and failures are keyed by the normalized 13-digit ISBN, so any
/// accepted spelling of an ISBN finds the same entry. Unknown ISBNs are
/// reported as not found.
///
/// # Examples
///
/// ```rust
/// use bookbridge::core::{ExternalBookRecord, LookupError};
/// use bookbridge::sources::MockBookSource;
/// use std::time::Duration;
///
/// let record = ExternalBookRecord {
///     title: Some("Nineteen Eighty-Four".into()),
///     ..Default::default()
/// };
///
/// let source = MockBookSource::new()
///     .with_book("0451524934", record)
///     .with_failure("9780306406157", LookupError::network("connection reset"))
///     .with_latency(Duration::from_millis(5));
/// ```
#[derive(Debug)]
pub struct MockBookSource {
    /// Name of this source instance.
    name: String,
    /// Records keyed by normalized ISBN.
    books: RwLock<HashMap<String, ExternalBookRecord>>,
    /// Forced failures keyed by normalized ISBN.
    failures: RwLock<HashMap<String, LookupError>>,
    /// Hits returned by title searches.
    search_hits: RwLock<Vec<BookSummary>>,
    /// Simulated latency for lookups.
    latency: Option<Duration>,
    /// Counter for lookups that passed validation.
    fetch_count: AtomicU64,
    /// Whether to fail health checks.
    unhealthy: RwLock<bool>,
}

impl MockBookSource {
    /// Creates a new, empty mock source.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            books: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            search_hits: RwLock::new(Vec::new()),
            latency: None,
            fetch_count: AtomicU64::new(0),
            unhealthy: RwLock::new(false),
        }
    }

    /// Sets the name of this source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a record for an ISBN. Invalid ISBNs are ignored.
    pub fn with_book(self, isbn: &str, record: ExternalBookRecord) -> Self {
        self.add_book(isbn, record);
        self
    }

    /// Forces lookups of an ISBN to fail. Invalid ISBNs are ignored.
    pub fn with_failure(self, isbn: &str, error: LookupError) -> Self {
        self.add_failure(isbn, error);
        self
    }

    /// Adds a hit returned by title searches.
    pub fn with_search_hit(self, hit: BookSummary) -> Self {
        self.search_hits
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(hit);
        self
    }

    /// Sets the simulated latency for lookups.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Adds a record for an ISBN (mutable version).
    pub fn add_book(&self, isbn: &str, record: ExternalBookRecord) {
        if let Ok(isbn) = Isbn::parse(isbn) {
            self.books
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .insert(isbn.into_string(), record);
        }
    }

    /// Forces lookups of an ISBN to fail (mutable version).
    pub fn add_failure(&self, isbn: &str, error: LookupError) {
        if let Ok(isbn) = Isbn::parse(isbn) {
            self.failures
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .insert(isbn.into_string(), error);
        }
    }

    /// Clears all configured records and failures.
    pub fn clear(&self) {
        self.books
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        self.failures
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Returns the number of lookups that reached the source.
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        *self
            .unhealthy
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = !healthy;
    }

    fn resolve(&self, isbn: &Isbn) -> Result<ExternalBookRecord, LookupError> {
        let failures = self
            .failures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(error) = failures.get(isbn.as_str()) {
            return Err(error.clone());
        }
        drop(failures);

        self.books
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(isbn.as_str())
            .cloned()
            .ok_or_else(|| LookupError::not_found(&self.name))
    }
}

impl Default for MockBookSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookSource for MockBookSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_book(&self, isbn: &str) -> BookLookup {
        let isbn = match Isbn::parse(isbn) {
            Ok(isbn) => isbn,
            Err(e) => return BookLookup::failed(&LookupError::from(e)),
        };

        self.fetch_count.fetch_add(1, Ordering::Relaxed);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        BookLookup::from(self.resolve(&isbn))
    }

    async fn search_by_title(&self, title: &str) -> SearchLookup {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return SearchLookup::failed(&LookupError::TitleRequired);
        }

        let hits = self
            .search_hits
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|hit| hit.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        SearchLookup::found(hits)
    }

    async fn health_check(&self) -> HealthStatus {
        if *self
            .unhealthy
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
        {
            return HealthStatus::unavailable(format!("{} is unhealthy", self.name));
        }
        HealthStatus::available(self.latency.map_or(0, |l| l.as_millis() as u64))
    }
}
