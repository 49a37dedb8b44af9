//! Lookup-then-transform orchestration.

use crate::audit;
use crate::core::{BookLookup, BookSource, ExternalBookRecord, ImportError, LookupError};
use crate::isbn::Isbn;
use crate::transform::{transform_book, transform_search_result, BookPreview, TransformedBookData};

use futures::future::join_all;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Configuration for the metadata manager.
#[derive(Debug, Clone, Default)]
pub struct MetadataManagerConfig {
    /// Upper bound on a single lookup, retries included. `None` waits for
    /// the source to settle on its own.
    pub lookup_timeout: Option<Duration>,
}

impl MetadataManagerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }
}

/// Outcome of a batch import.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Per-input outcomes keyed by the caller's original strings.
    pub results: HashMap<String, Result<TransformedBookData, ImportError>>,
    /// Number of inputs that produced a book.
    pub succeeded: usize,
    /// Number of inputs that failed.
    pub failed: usize,
}

impl ImportReport {
    fn from_results(results: HashMap<String, Result<TransformedBookData, ImportError>>) -> Self {
        let succeeded = results.values().filter(|r| r.is_ok()).count();
        let failed = results.len() - succeeded;
        Self {
            results,
            succeeded,
            failed,
        }
    }

    /// Returns the number of inputs.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Returns the imported books.
    pub fn books(&self) -> impl Iterator<Item = &TransformedBookData> {
        self.results.values().filter_map(|r| r.as_ref().ok())
    }

    /// Returns the outcome for an input string.
    pub fn get(&self, input: &str) -> Option<&Result<TransformedBookData, ImportError>> {
        self.results.get(input)
    }
}

/// Runs validated lookups against a book source and normalizes the result.
///
/// # Example
///
/// ```rust,ignore
/// use bookbridge::manager::MetadataManager;
/// use bookbridge::sources::OpenLibraryClient;
///
/// let manager = MetadataManager::new(OpenLibraryClient::with_defaults()?);
/// let book = manager.import_book("0451524934").await?;
/// println!("{} by {:?}", book.title, book.authors);
/// ```
#[derive(Debug)]
pub struct MetadataManager<S> {
    source: S,
    config: MetadataManagerConfig,
}

impl<S: BookSource> MetadataManager<S> {
    /// Creates a manager with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, MetadataManagerConfig::default())
    }

    /// Creates a manager with the given configuration.
    pub fn with_config(source: S, config: MetadataManagerConfig) -> Self {
        Self { source, config }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MetadataManagerConfig {
        &self.config
    }

    /// Validates, fetches and transforms a single ISBN.
    pub async fn import_book(&self, isbn: &str) -> Result<TransformedBookData, ImportError> {
        let isbn = Isbn::parse(isbn).map_err(LookupError::from)?;

        let record = self.fetch(&isbn).await?;
        let book = transform_book(&record, isbn.as_str())?;

        tracing::info!(
            isbn = %isbn,
            title = %book.title,
            authors = book.authors.len(),
            categories = book.categories.len(),
            "Book imported"
        );
        Ok(book)
    }

    /// Imports many ISBNs concurrently.
    ///
    /// Every input settles independently; one failure never cancels or
    /// delays the others.
    pub async fn import_books(&self, isbns: &[String]) -> ImportReport {
        let start = Instant::now();

        let imports = isbns.iter().map(|isbn| async move {
            let outcome = self.import_book(isbn).await;
            if let Err(e) = &outcome {
                tracing::debug!(isbn = %isbn, error = %e, "Import failed");
            }
            (isbn.clone(), outcome)
        });
        let report = ImportReport::from_results(join_all(imports).await.into_iter().collect());

        audit::emit_batch_completed(
            "import_books",
            self.source.name(),
            report.total(),
            report.succeeded,
            start.elapsed(),
        );
        report
    }

    /// Searches by title and returns canonical previews of the hits.
    pub async fn search(&self, title: &str) -> Result<Vec<BookPreview>, ImportError> {
        let result = self.source.search_by_title(title).await;
        if !result.success {
            return Err(ImportError::SourceFailed {
                message: result.error.unwrap_or_default(),
                status_code: result.status_code,
            });
        }

        Ok(result
            .books
            .unwrap_or_default()
            .iter()
            .map(transform_search_result)
            .collect())
    }

    async fn fetch(&self, isbn: &Isbn) -> Result<ExternalBookRecord, ImportError> {
        let lookup = match self.config.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch_book(isbn.as_str()))
                .await
                .map_err(|_| {
                    tracing::warn!(isbn = %isbn, timeout_ms = limit.as_millis() as u64, "Lookup timed out");
                    LookupError::network(format!("lookup timed out after {:?}", limit))
                })?,
            None => self.source.fetch_book(isbn.as_str()).await,
        };

        into_record(lookup)
    }
}

fn into_record(lookup: BookLookup) -> Result<ExternalBookRecord, ImportError> {
    match lookup {
        BookLookup {
            success: true,
            book: Some(book),
            ..
        } => Ok(book),
        BookLookup {
            error, status_code, ..
        } => Err(ImportError::SourceFailed {
            message: error.unwrap_or_else(|| "lookup returned no record".to_string()),
            status_code,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AuthorEntry, BookSummary, IsbnError, NamedEntry};
    use crate::sources::MockBookSource;

    fn orwell() -> ExternalBookRecord {
        ExternalBookRecord {
            title: Some("Nineteen Eighty-Four".into()),
            authors: vec![AuthorEntry::named("George Orwell")],
            subjects: vec![NamedEntry::from("fiction")],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_import_book() {
        let manager = MetadataManager::new(MockBookSource::new().with_book("0451524934", orwell()));

        let book = manager.import_book("0-451-52493-4").await.unwrap();
        assert_eq!(book.isbn_code, "9780451524935");
        assert_eq!(book.authors[0].surname, "Orwell");
        assert_eq!(book.categories[0].name, "Fiction");
    }

    #[tokio::test]
    async fn test_invalid_isbn_never_reaches_source() {
        let manager = MetadataManager::new(MockBookSource::new());

        let err = manager.import_book("9780451524934").await.unwrap_err();
        assert!(matches!(
            err,
            ImportError::Lookup(LookupError::InvalidIsbn(IsbnError::InvalidIsbn13Checksum))
        ));
        assert_eq!(manager.source().fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_not_found_keeps_status() {
        let manager = MetadataManager::new(MockBookSource::new());

        let err = manager.import_book("9780306406157").await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "Book not found in mock");
    }

    #[tokio::test]
    async fn test_lookup_timeout() {
        let source = MockBookSource::new()
            .with_book("0451524934", orwell())
            .with_latency(Duration::from_millis(200));
        let manager = MetadataManager::with_config(
            source,
            MetadataManagerConfig::new().with_lookup_timeout(Duration::from_millis(20)),
        );

        let err = manager.import_book("0451524934").await.unwrap_err();
        assert!(matches!(err, ImportError::Lookup(LookupError::Network { .. })));
    }

    #[tokio::test]
    async fn test_import_books_isolates_failures() {
        let source = MockBookSource::new()
            .with_book("0451524934", orwell())
            .with_failure("9780306406157", LookupError::service_unavailable("mock", 503));
        let manager = MetadataManager::new(source);

        let inputs = vec![
            "0451524934".to_string(),
            "9780306406157".to_string(),
            "not-an-isbn".to_string(),
        ];
        let report = manager.import_books(&inputs).await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 2);
        assert!(report.get("0451524934").unwrap().is_ok());
        assert_eq!(
            report.get("9780306406157").unwrap().as_ref().unwrap_err().status_code(),
            Some(503)
        );
        assert_eq!(report.books().count(), 1);
    }

    #[tokio::test]
    async fn test_search_previews() {
        let source = MockBookSource::new().with_search_hit(BookSummary {
            title: "Nineteen Eighty-Four".into(),
            authors: vec!["George Orwell".into()],
            isbns: vec!["9780451524935".into()],
            publish_year: Some(1949),
            key: None,
        });
        let manager = MetadataManager::new(source);

        let previews = manager.search("nineteen").await.unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].isbn_code.as_deref(), Some("9780451524935"));

        let err = manager.search(" ").await.unwrap_err();
        assert_eq!(err.to_string(), "Title is required for search");
    }
}
