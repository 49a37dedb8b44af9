//! Core traits for the bookbridge library.
//!
//! This module defines the `BookSource` trait that every bibliographic
//! backend implements, so the orchestration layer can be driven by the
//! real Open Library client in production and a mock in tests.

use crate::core::result::{BatchLookup, BookLookup, HealthStatus, SearchLookup};

use async_trait::async_trait;
use futures::future::join_all;
use std::fmt::Debug;

/// An external source of book metadata.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync` for use in async contexts.
/// - Lookups never return `Err`; every failure is folded into the result
///   object so callers only branch on `success`.
/// - Invalid ISBNs must be rejected before any network access.
/// - Implementations should never panic.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use bookbridge::core::{BookLookup, BookSource, HealthStatus, SearchLookup};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyCatalogue;
///
/// #[async_trait]
/// impl BookSource for MyCatalogue {
///     fn name(&self) -> &str {
///         "my-catalogue"
///     }
///
///     async fn fetch_book(&self, isbn: &str) -> BookLookup {
///         todo!()
///     }
///
///     async fn search_by_title(&self, title: &str) -> SearchLookup {
///         todo!()
///     }
///
///     async fn health_check(&self) -> HealthStatus {
///         HealthStatus::available(0)
///     }
/// }
/// ```
#[async_trait]
pub trait BookSource: Send + Sync + Debug {
    /// Returns a stable, human-readable name for this source.
    fn name(&self) -> &str;

    /// Looks up a single book by ISBN (any accepted raw form).
    async fn fetch_book(&self, isbn: &str) -> BookLookup;

    /// Looks up many ISBNs concurrently.
    ///
    /// Each entry settles independently; the map is keyed by the original,
    /// un-normalized input strings.
    async fn fetch_books(&self, isbns: &[String]) -> BatchLookup {
        let lookups = isbns.iter().map(|isbn| async move {
            let result = self.fetch_book(isbn).await;
            (isbn.clone(), result)
        });

        join_all(lookups).await.into_iter().collect()
    }

    /// Searches the source by title.
    async fn search_by_title(&self, title: &str) -> SearchLookup;

    /// Probes the source with one lightweight request.
    async fn health_check(&self) -> HealthStatus;
}

/// A boxed book source for type-erased storage.
pub type BoxedBookSource = Box<dyn BookSource>;

/// An arc-wrapped book source for shared ownership.
pub type ArcBookSource = std::sync::Arc<dyn BookSource>;
