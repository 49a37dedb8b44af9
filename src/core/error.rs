//! Error types for the bookbridge library.
//!
//! This module provides structured, typed errors for every failure scenario
//! in the metadata pipeline. The library never panics; all errors are
//! returned as `Result` values.
//!
//! The families map onto the pipeline stages:
//!
//! - [`IsbnError`] - malformed identifiers, raised before any network access
//! - [`CircuitOpenError`] - the breaker rejected a call without running it
//! - [`LookupError`] - everything that can go wrong talking to a book source
//! - [`TransformError`] - contract violations when normalizing a record
//! - [`ConfigError`] - invalid breaker or client configuration

use std::time::Duration;
use thiserror::Error;

/// Validation failures for ISBN input.
///
/// Display strings are the human-readable reasons surfaced to callers, e.g.
/// inside `"Invalid ISBN: <reason>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsbnError {
    /// The input was missing or blank.
    #[error("ISBN is required")]
    IsbnRequired,

    /// Normalization was handed an empty string.
    #[error("ISBN input is empty")]
    EmptyInput,

    /// Nothing usable remained after stripping separators and noise.
    #[error("ISBN contains no valid characters")]
    NoValidCharacters,

    /// The normalized identifier is neither 10 nor 13 characters long.
    #[error("ISBN must be 10 or 13 characters long (got {actual})")]
    InvalidLength {
        /// Length of the normalized input.
        actual: usize,
    },

    /// An ISBN-10 that is not nine digits followed by a digit or `X`.
    #[error("ISBN-10 must be 9 digits followed by a digit or 'X'")]
    InvalidIsbn10Characters,

    /// An ISBN-13 containing something other than digits.
    #[error("ISBN-13 must contain only digits")]
    DigitsOnly,

    /// An ISBN-13 whose prefix is not a bookland EAN prefix.
    #[error("ISBN-13 must start with 978 or 979 (got {prefix})")]
    InvalidPrefix {
        /// The three leading characters that were found.
        prefix: String,
    },

    /// The ISBN-10 weighted sum is not divisible by 11.
    #[error("invalid ISBN-10 checksum")]
    InvalidIsbn10Checksum,

    /// The ISBN-13 check digit does not match.
    #[error("invalid ISBN-13 checksum")]
    InvalidIsbn13Checksum,
}

/// Returned by a circuit breaker that refused to run an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("circuit breaker open for '{endpoint}'")]
pub struct CircuitOpenError {
    /// Name of the guarded endpoint.
    pub endpoint: String,
    /// Time left until the breaker will allow a probe, if known.
    pub retry_after: Option<Duration>,
}

impl CircuitOpenError {
    /// Creates a new `CircuitOpenError`.
    pub fn new(endpoint: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.into(),
            retry_after,
        }
    }
}

/// Errors raised while looking up books in an external source.
///
/// The `Display` output of each variant is the exact message placed in the
/// `error` field of a failed lookup result.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The ISBN failed validation; no request was made.
    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(#[from] IsbnError),

    /// A title search was requested with a blank title.
    #[error("Title is required for search")]
    TitleRequired,

    /// The source answered but has no record for the key.
    #[error("Book not found in {service}")]
    NotFound {
        /// Human-readable name of the source.
        service: String,
    },

    /// No response reached the source (DNS, connect, reset, timeout).
    #[error("Network error - please check your internet connection")]
    Network {
        /// Underlying transport message, kept for logs.
        message: String,
    },

    /// The source answered with a 5xx status.
    #[error("{service} service is temporarily unavailable")]
    ServiceUnavailable {
        /// Human-readable name of the source.
        service: String,
        /// The 5xx status code returned.
        status: u16,
    },

    /// The source answered with a non-404 client error.
    #[error("{service} request failed with status {status}")]
    UnexpectedStatus {
        /// Human-readable name of the source.
        service: String,
        /// The status code returned.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse {service} response: {message}")]
    Parse {
        /// Human-readable name of the source.
        service: String,
        /// Decoder error message.
        message: String,
    },

    /// The circuit breaker rejected the call.
    #[error("{} circuit is open - try again later", .0.endpoint)]
    CircuitOpen(#[from] CircuitOpenError),

    /// The client could not be constructed.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl LookupError {
    /// Returns `true` for transient failures that a retry may fix.
    ///
    /// Only transport failures and 5xx responses qualify; a tripped breaker
    /// must never be retried internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::ServiceUnavailable { .. })
    }

    /// Returns the HTTP-like status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::ServiceUnavailable { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::CircuitOpen(_) => Some(503),
            _ => None,
        }
    }

    /// Returns `true` if this is a well-formed negative result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Creates a `Network` error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a `NotFound` error.
    pub fn not_found(service: impl Into<String>) -> Self {
        Self::NotFound {
            service: service.into(),
        }
    }

    /// Creates a `ServiceUnavailable` error.
    pub fn service_unavailable(service: impl Into<String>, status: u16) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
            status,
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Errors raised by the data transformer.
///
/// These are contract violations by the caller, not data-quality issues in
/// the external record, and are never recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The ISBN handed to the transformer does not validate.
    #[error("invalid ISBN for transformation '{isbn}': {source}")]
    InvalidIsbnForTransformation {
        /// The ISBN as supplied.
        isbn: String,
        /// Why it failed validation.
        #[source]
        source: IsbnError,
    },
}

/// Errors raised when building configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range.
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// An environment variable could not be parsed.
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv {
        /// Variable name.
        name: String,
        /// Raw value found.
        value: String,
    },
}

/// Errors raised by the lookup-then-transform pipeline.
#[derive(Debug, Clone, Error)]
pub enum ImportError {
    /// The lookup failed before reaching the source.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The source answered with a failed lookup.
    #[error("{message}")]
    SourceFailed {
        /// The source's failure message.
        message: String,
        /// Status code reported with the failure, if any.
        status_code: Option<u16>,
    },

    /// The record could not be transformed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl ImportError {
    /// Returns the status code associated with the failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Lookup(e) => e.status_code(),
            Self::SourceFailed { status_code, .. } => *status_code,
            Self::Transform(_) => None,
        }
    }
}

/// A specialized `Result` type for ISBN validation.
pub type IsbnResult<T> = Result<T, IsbnError>;

/// A specialized `Result` type for source lookups.
pub type SourceResult<T> = Result<T, LookupError>;

/// A specialized `Result` type for transformation.
pub type TransformResult<T> = Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages_match_contract() {
        assert_eq!(
            LookupError::not_found("Open Library").to_string(),
            "Book not found in Open Library"
        );
        assert_eq!(
            LookupError::network("connection refused").to_string(),
            "Network error - please check your internet connection"
        );
        assert_eq!(
            LookupError::service_unavailable("Open Library", 503).to_string(),
            "Open Library service is temporarily unavailable"
        );
        assert_eq!(
            LookupError::TitleRequired.to_string(),
            "Title is required for search"
        );
        assert_eq!(
            LookupError::from(IsbnError::InvalidIsbn13Checksum).to_string(),
            "Invalid ISBN: invalid ISBN-13 checksum"
        );
    }

    #[test]
    fn test_lookup_error_is_retryable() {
        assert!(LookupError::network("reset").is_retryable());
        assert!(LookupError::service_unavailable("Open Library", 502).is_retryable());

        assert!(!LookupError::not_found("Open Library").is_retryable());
        assert!(!LookupError::TitleRequired.is_retryable());
        let open = LookupError::from(CircuitOpenError::new("Open Library", None));
        assert!(!open.is_retryable());
    }

    #[test]
    fn test_lookup_error_status_code() {
        assert_eq!(LookupError::not_found("x").status_code(), Some(404));
        assert_eq!(
            LookupError::service_unavailable("x", 500).status_code(),
            Some(500)
        );
        assert_eq!(LookupError::network("x").status_code(), None);
        assert_eq!(
            LookupError::from(IsbnError::DigitsOnly).status_code(),
            None
        );
    }

    #[test]
    fn test_circuit_open_display() {
        let err = LookupError::from(CircuitOpenError::new("Open Library", None));
        assert_eq!(err.to_string(), "Open Library circuit is open - try again later");
    }

    #[test]
    fn test_transform_error_display() {
        let err = TransformError::InvalidIsbnForTransformation {
            isbn: "invalid-isbn".into(),
            source: IsbnError::InvalidLength { actual: 1 },
        };
        assert!(err.to_string().contains("invalid-isbn"));
    }
}
