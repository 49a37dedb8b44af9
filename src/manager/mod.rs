//! Orchestration of lookups.
//!
//! The `MetadataManager` drives a `BookSource` and the transformer to turn
//! raw ISBN input into canonical book records. The retry loop used by the
//! HTTP sources lives here as well.

mod metadata_manager;
mod retry;

pub use metadata_manager::{ImportReport, MetadataManager, MetadataManagerConfig};
pub use retry::{retry_async, RetryConfig, Retryable};
