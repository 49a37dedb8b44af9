//! # Bookbridge
//!
//! Reliable book metadata acquisition: ISBN validation, circuit-breaker
//! guarded Open Library lookups, and normalization of loosely-structured
//! external records into a canonical book shape.
//!
//! ## Overview
//!
//! Bookbridge sits between a catalogue application and an unreliable
//! third-party bibliographic service, allowing you to:
//!
//! - Validate and normalize ISBN-10 / ISBN-13 input before any network access
//! - Look up books by ISBN, alone or in concurrent batches
//! - Search by title and build cover image URLs
//! - Survive outages with retries and a per-endpoint circuit breaker
//! - Normalize raw records into canonical books, authors and categories
//! - Emit structured audit logs for every lookup and breaker transition
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookbridge::{MetadataManager, OpenLibraryClient, OpenLibraryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create the client
//!     let client = OpenLibraryClient::new(OpenLibraryConfig::from_env()?)?;
//!
//!     // Look up and normalize a book
//!     let manager = MetadataManager::new(client);
//!     let book = manager.import_book("978-0-451-52493-5").await?;
//!
//!     println!("{} ({} authors)", book.title, book.authors.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Core**: Record types, result contracts, the `BookSource` trait and errors
//! - **ISBN**: Pure parsing, checksum validation and conversion
//! - **Circuit Breaker**: Resilience for a failing endpoint
//! - **Sources**: Open Library client and a mock source
//! - **Transform**: Record-to-canonical normalization
//! - **Manager**: Retry loop and lookup-then-transform orchestration
//! - **Audit**: Structured logging of lookups and breaker transitions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod circuit_breaker;
pub mod core;
pub mod isbn;
pub mod manager;
pub mod sources;
pub mod transform;

// Re-export commonly used types at the crate root
pub use crate::core::{
    BatchLookup, BookLookup, BookSource, BookSummary, ExternalBookRecord, HealthStatus,
    ImportError, IsbnError, LookupError, SearchLookup, TransformError,
};

pub use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use crate::isbn::{Isbn, IsbnFormat, ValidationResult};
pub use crate::manager::{MetadataManager, RetryConfig};
pub use crate::sources::{CoverSize, MockBookSource, OpenLibraryClient, OpenLibraryConfig};
pub use crate::transform::{transform_book, TransformedBookData};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bookbridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        BatchLookup, BookLookup, BookSource, BookSummary, ExternalBookRecord, HealthStatus,
        ImportError, IsbnError, LookupError, SearchLookup, TransformError,
    };
    pub use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
    pub use crate::isbn::{Isbn, IsbnFormat, ValidationResult};
    pub use crate::manager::{ImportReport, MetadataManager, RetryConfig};
    pub use crate::sources::{CoverSize, MockBookSource, OpenLibraryClient, OpenLibraryConfig};
    pub use crate::transform::{
        transform_book, AuthorData, CategoryData, CategoryType, TransformedBookData,
    };
}
