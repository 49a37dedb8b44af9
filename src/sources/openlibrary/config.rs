//! Open Library client configuration.

use crate::circuit_breaker::CircuitBreakerConfig;
use crate::core::{ConfigError, IsbnError};
use crate::manager::RetryConfig;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "OPEN_LIBRARY_BASE_URL";
/// Environment variable overriding the request timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "OPEN_LIBRARY_TIMEOUT_MS";
/// Environment variable overriding the breaker failure threshold.
pub const ENV_FAILURE_THRESHOLD: &str = "OPEN_LIBRARY_FAILURE_THRESHOLD";
/// Environment variable overriding the breaker reset timeout, in milliseconds.
pub const ENV_RESET_TIMEOUT_MS: &str = "OPEN_LIBRARY_RESET_TIMEOUT_MS";

/// Open Library client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenLibraryConfig {
    /// Base URL for the books and search APIs.
    pub base_url: String,

    /// Base URL for cover images.
    pub covers_base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Maximum number of hits requested from a title search.
    pub search_limit: u32,

    /// Circuit breaker guarding the API.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            covers_base_url: "https://openlibrary.org/covers".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("bookbridge/", env!("CARGO_PKG_VERSION")).to_string(),
            search_limit: 20,
            circuit_breaker: CircuitBreakerConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl OpenLibraryConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from the defaults overlaid with the
    /// `OPEN_LIBRARY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_TIMEOUT_MS)? {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(threshold) = parse_var::<u32, _>(&lookup, ENV_FAILURE_THRESHOLD)? {
            config.circuit_breaker.failure_threshold = threshold;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_RESET_TIMEOUT_MS)? {
            config.circuit_breaker.reset_timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the covers base URL.
    pub fn with_covers_base_url(mut self, url: impl Into<String>) -> Self {
        self.covers_base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the search hit limit.
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Sets the circuit breaker configuration.
    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = config;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Checks every field, including the nested breaker and retry configs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.search_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "search_limit",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.circuit_breaker.validate()?;
        self.retry.validate()
    }

    /// Returns the base URL without a trailing slash.
    pub(crate) fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the covers base URL without a trailing slash.
    pub(crate) fn covers_root(&self) -> &str {
        self.covers_base_url.trim_end_matches('/')
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                name: name.to_string(),
                value: raw,
            }),
    }
}

/// Cover image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoverSize {
    /// Small thumbnail.
    S,
    /// Medium image.
    #[default]
    M,
    /// Large image.
    L,
}

impl CoverSize {
    /// Returns the size letter used in cover URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown cover size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cover size '{0}', expected S, M or L")]
pub struct ParseCoverSizeError(pub String);

impl FromStr for CoverSize {
    type Err = ParseCoverSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" | "s" => Ok(Self::S),
            "M" | "m" => Ok(Self::M),
            "L" | "l" => Ok(Self::L),
            other => Err(ParseCoverSizeError(other.to_string())),
        }
    }
}

/// Builds the cover image URL for an ISBN.
///
/// The ISBN is validated first and the 13-digit form is used in the path.
pub fn cover_url(covers_root: &str, isbn: &str, size: CoverSize) -> Result<String, IsbnError> {
    let isbn = crate::isbn::Isbn::parse(isbn)?;
    Ok(format!(
        "{}/isbn/{}-{}.jpg",
        covers_root.trim_end_matches('/'),
        isbn,
        size
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = OpenLibraryConfig::default();
        assert_eq!(config.base_url, "https://openlibrary.org");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.user_agent.starts_with("bookbridge/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = OpenLibraryConfig::from_lookup(vars(&[
            (ENV_BASE_URL, "http://localhost:8080/"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_FAILURE_THRESHOLD, "2"),
            (ENV_RESET_TIMEOUT_MS, "1000"),
        ]))
        .unwrap();

        assert_eq!(config.api_root(), "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.circuit_breaker.failure_threshold, 2);
        assert_eq!(config.circuit_breaker.reset_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = OpenLibraryConfig::from_lookup(vars(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_MS.to_string(),
                value: "soon".to_string(),
            }
        );

        let err =
            OpenLibraryConfig::from_lookup(vars(&[(ENV_FAILURE_THRESHOLD, "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "failure_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_cover_size_parsing() {
        assert_eq!("S".parse::<CoverSize>().unwrap(), CoverSize::S);
        assert_eq!("l".parse::<CoverSize>().unwrap(), CoverSize::L);
        assert_eq!(CoverSize::default(), CoverSize::M);
        assert!("XL".parse::<CoverSize>().is_err());
    }

    #[test]
    fn test_cover_url() {
        assert_eq!(
            cover_url("https://openlibrary.org/covers", "0451524934", CoverSize::L).unwrap(),
            "https://openlibrary.org/covers/isbn/9780451524935-L.jpg"
        );
        assert_eq!(
            cover_url("https://openlibrary.org/covers/", "978-0-451-52493-5", CoverSize::M)
                .unwrap(),
            "https://openlibrary.org/covers/isbn/9780451524935-M.jpg"
        );
        assert_eq!(
            cover_url("https://openlibrary.org/covers", "9780451524934", CoverSize::S),
            Err(IsbnError::InvalidIsbn13Checksum)
        );
    }
}
