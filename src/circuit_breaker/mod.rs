//! Circuit breaker for external endpoint resilience.
//!
//! The circuit breaker pattern prevents cascading failures by temporarily
//! stopping traffic to a failing endpoint and cautiously probing it to
//! detect recovery.
//!
//! ## States
//!
//! - **Closed**: Normal operation; calls pass through.
//! - **Open**: Endpoint is failing; calls are rejected immediately.
//! - **Half-Open**: Probing the endpoint to see if it has recovered.
//!
//! ```text
//! Closed   → Open:     failure_count reaches failure_threshold
//! Open     → HalfOpen: next call after reset_timeout since the last failure
//! HalfOpen → Closed:   success_threshold consecutive successes
//! HalfOpen → Open:     any failure
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookbridge::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
//! use std::time::Duration;
//!
//! let config = CircuitBreakerConfig::default()
//!     .with_failure_threshold(5)
//!     .with_reset_timeout(Duration::from_secs(30));
//!
//! let breaker = CircuitBreaker::new("Open Library", config);
//! let body = breaker.execute(|| fetch_something()).await?;
//! ```

mod breaker;
mod config;
mod state;

pub use breaker::CircuitBreaker;
pub use config::CircuitBreakerConfig;
pub use state::{BreakerMetrics, CircuitBreakerSnapshot, CircuitState};
