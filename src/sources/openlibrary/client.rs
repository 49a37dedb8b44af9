//! Open Library HTTP client.

use super::config::{cover_url, CoverSize, OpenLibraryConfig};
use super::dto::{BooksResponse, SearchResponse};
use crate::audit::{self, LookupAuditEvent};
use crate::circuit_breaker::{BreakerMetrics, CircuitBreaker, CircuitBreakerSnapshot};
use crate::core::{
    BatchLookup, BookLookup, BookSource, BookSummary, ExternalBookRecord, HealthStatus, IsbnError,
    LookupError, SearchLookup, SourceResult,
};
use crate::isbn::Isbn;
use crate::manager::retry_async;

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Instant;

/// Human-readable service name used in messages and logs.
pub const SERVICE_NAME: &str = "Open Library";

/// Outcome of a single HTTP attempt.
///
/// The outer error is a transient failure (transport or 5xx) that the
/// circuit breaker counts and the retry loop may repeat. The inner error is
/// a definitive answer from the service that must not trip the breaker.
type Attempt = Result<SourceResult<String>, LookupError>;

/// Client for the Open Library books and search APIs.
///
/// Every request runs through a bounded retry loop, and every attempt of
/// that loop passes through the client's own circuit breaker. Lookups fold
/// failures into [`BookLookup`] / [`SearchLookup`] result objects instead of
/// returning `Err`.
///
/// # Example
///
/// ```rust,ignore
/// use bookbridge::sources::{OpenLibraryClient, OpenLibraryConfig};
///
/// let client = OpenLibraryClient::new(OpenLibraryConfig::default())?;
/// let lookup = client.fetch_book_by_isbn("0451524934").await;
/// if lookup.success {
///     println!("{:?}", lookup.book.unwrap().title);
/// }
/// ```
#[derive(Debug)]
pub struct OpenLibraryClient {
    config: OpenLibraryConfig,
    http: reqwest::Client,
    breaker: CircuitBreaker,
}

impl OpenLibraryClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenLibraryConfig) -> Result<Self, LookupError> {
        config
            .validate()
            .map_err(|e| LookupError::configuration(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                LookupError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let breaker = CircuitBreaker::new(SERVICE_NAME, config.circuit_breaker.clone());

        Ok(Self {
            config,
            http,
            breaker,
        })
    }

    /// Creates a client with default configuration.
    pub fn with_defaults() -> Result<Self, LookupError> {
        Self::new(OpenLibraryConfig::default())
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &OpenLibraryConfig {
        &self.config
    }

    /// Looks up a single book by ISBN.
    ///
    /// Invalid input is rejected without any network access or breaker
    /// interaction.
    pub async fn fetch_book_by_isbn(&self, isbn: &str) -> BookLookup {
        let start = Instant::now();

        let lookup = match Isbn::parse(isbn) {
            Ok(parsed) => BookLookup::from(self.lookup(&parsed).await),
            Err(e) => BookLookup::failed(&LookupError::from(e)),
        };

        audit::emit_lookup_completed(&LookupAuditEvent::new(
            SERVICE_NAME,
            isbn,
            &lookup,
            start.elapsed(),
        ));
        lookup
    }

    /// Looks up many ISBNs concurrently.
    ///
    /// Results are keyed by the original input strings. A failing entry never
    /// affects its siblings.
    pub async fn fetch_books_by_isbns(&self, isbns: &[String]) -> BatchLookup {
        let start = Instant::now();
        let results = BookSource::fetch_books(self, isbns).await;

        let succeeded = results.values().filter(|r| r.success).count();
        audit::emit_batch_completed(
            "fetch_books",
            SERVICE_NAME,
            results.len(),
            succeeded,
            start.elapsed(),
        );
        results
    }

    /// Searches the catalogue by title.
    pub async fn search_books_by_title(&self, title: &str) -> SearchLookup {
        let title = title.trim();
        if title.is_empty() {
            return SearchLookup::failed(&LookupError::TitleRequired);
        }

        SearchLookup::from(self.search(title, self.config.search_limit).await)
    }

    /// Builds the cover image URL for an ISBN.
    ///
    /// This is a pure URL-construction helper, so invalid input is an error
    /// rather than a failed lookup.
    pub fn cover_url(&self, isbn: &str, size: CoverSize) -> Result<String, IsbnError> {
        cover_url(self.config.covers_root(), isbn, size)
    }

    /// Probes the search API with a single one-hit query.
    ///
    /// The probe bypasses retries and the circuit breaker so it reports the
    /// service's own health.
    pub async fn health_check(&self) -> HealthStatus {
        let start = Instant::now();
        let url = format!("{}/search.json", self.config.api_root());

        let result = self
            .http
            .get(&url)
            .query(&[("q", "test"), ("limit", "1")])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                HealthStatus::available(start.elapsed().as_millis() as u64)
            }
            Ok(response) => HealthStatus::unavailable(format!(
                "{} responded with status {}",
                SERVICE_NAME,
                response.status().as_u16()
            )),
            Err(e) => {
                tracing::debug!(error = %e, "Health probe failed");
                HealthStatus::unavailable(LookupError::network(e.to_string()).to_string())
            }
        }
    }

    /// Returns a snapshot of the circuit breaker.
    pub fn breaker_stats(&self) -> CircuitBreakerSnapshot {
        self.breaker.stats()
    }

    /// Returns the circuit breaker's lifetime metrics.
    pub fn breaker_metrics(&self) -> BreakerMetrics {
        self.breaker.metrics()
    }

    /// Forces the circuit breaker closed.
    pub fn reset_breaker(&self) {
        self.breaker.reset();
    }

    /// Fetches the record for a validated ISBN.
    pub async fn lookup(&self, isbn: &Isbn) -> SourceResult<ExternalBookRecord> {
        let bibkey = isbn.bibkey();
        let url = format!("{}/api/books", self.config.api_root());
        let query = [
            ("bibkeys", bibkey.clone()),
            ("format", "json".to_string()),
            ("jscmd", "data".to_string()),
        ];

        let body = self.get_guarded(&url, &query).await?;
        let mut books: BooksResponse = serde_json::from_str(&body).map_err(parse_error)?;

        match books.remove(&bibkey) {
            Some(record) => {
                tracing::debug!(isbn = %isbn, "Book found");
                Ok(record)
            }
            None => Err(LookupError::not_found(SERVICE_NAME)),
        }
    }

    /// Runs a title search and maps every hit to a summary.
    pub async fn search(&self, title: &str, limit: u32) -> SourceResult<Vec<BookSummary>> {
        let url = format!("{}/search.json", self.config.api_root());
        let query = [("title", title.to_string()), ("limit", limit.to_string())];

        let body = self.get_guarded(&url, &query).await?;
        let response: SearchResponse = serde_json::from_str(&body).map_err(parse_error)?;

        tracing::debug!(
            title = %title,
            num_found = response.num_found,
            returned = response.docs.len(),
            "Search completed"
        );
        Ok(response.docs.into_iter().map(BookSummary::from).collect())
    }

    /// Issues a GET through the retry loop and the circuit breaker.
    async fn get_guarded(&self, url: &str, query: &[(&str, String)]) -> SourceResult<String> {
        let outcome = retry_async(&self.config.retry, move || {
            self.breaker.execute(move || self.send(url, query))
        })
        .await;

        if let Err(e) = &outcome {
            tracing::warn!(url = %url, error = %e, "Open Library request failed");
        }
        outcome.and_then(|answer| answer)
    }

    /// A single HTTP attempt.
    async fn send(&self, url: &str, query: &[(&str, String)]) -> Attempt {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::network(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(LookupError::service_unavailable(
                SERVICE_NAME,
                status.as_u16(),
            ));
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(Err(LookupError::not_found(SERVICE_NAME)));
        }
        if !status.is_success() {
            return Ok(Err(LookupError::UnexpectedStatus {
                service: SERVICE_NAME.to_string(),
                status: status.as_u16(),
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::network(e.to_string()))?;
        Ok(Ok(body))
    }
}

fn parse_error(e: serde_json::Error) -> LookupError {
    LookupError::Parse {
        service: SERVICE_NAME.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl BookSource for OpenLibraryClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn fetch_book(&self, isbn: &str) -> BookLookup {
        self.fetch_book_by_isbn(isbn).await
    }

    async fn search_by_title(&self, title: &str) -> SearchLookup {
        self.search_books_by_title(title).await
    }

    async fn health_check(&self) -> HealthStatus {
        OpenLibraryClient::health_check(self).await
    }
}
