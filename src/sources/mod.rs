//! Book source implementations.
//!
//! This module contains implementations of the `BookSource` trait.
//!
//! ## Available Sources
//!
//! - [`openlibrary`] - Open Library REST API behind a circuit breaker and retries
//! - [`mock`] - An in-memory source for testing

pub mod mock;
pub mod openlibrary;

// Re-exports
pub use mock::MockBookSource;
pub use openlibrary::{CoverSize, OpenLibraryClient, OpenLibraryConfig};
