//! Core types and traits for the bookbridge library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - The loosely-typed `ExternalBookRecord` and its parts
//! - [`traits`] - The `BookSource` trait
//! - [`error`] - Structured error types
//! - [`result`] - Outbound lookup result contracts

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use error::{
    CircuitOpenError, ConfigError, ImportError, IsbnError, IsbnResult, LookupError,
    SourceResult, TransformError, TransformResult,
};
pub use result::{BatchLookup, BookLookup, BookSummary, HealthStatus, SearchLookup};
pub use traits::{ArcBookSource, BookSource, BoxedBookSource};
pub use types::{
    AuthorEntry, CoverUrls, ExternalBookRecord, Identifiers, LanguageRef, NamedEntry, TextValue,
};
