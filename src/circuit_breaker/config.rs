//! Circuit breaker configuration.

use crate::core::ConfigError;
use std::time::Duration;

/// Configuration for a circuit breaker.
///
/// Immutable once handed to [`CircuitBreaker::new`](super::CircuitBreaker::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures in the closed state before the circuit opens.
    pub failure_threshold: u32,

    /// Consecutive half-open successes needed to close the circuit.
    pub success_threshold: u32,

    /// How long the circuit stays open, measured from the last failure,
    /// before the next call is let through as a probe.
    pub reset_timeout: Duration,

    /// Observation window reported alongside the breaker's statistics.
    ///
    /// Failure counting is consecutive rather than windowed, so this value
    /// does not influence state transitions.
    pub monitoring_period: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 3,
            reset_timeout: Duration::from_secs(60),
            monitoring_period: Duration::from_secs(10),
        }
    }
}

impl CircuitBreakerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure threshold.
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Sets the half-open success threshold.
    pub fn with_success_threshold(mut self, threshold: u32) -> Self {
        self.success_threshold = threshold;
        self
    }

    /// Sets the reset timeout.
    pub fn with_reset_timeout(mut self, timeout: Duration) -> Self {
        self.reset_timeout = timeout;
        self
    }

    /// Sets the monitoring period.
    pub fn with_monitoring_period(mut self, period: Duration) -> Self {
        self.monitoring_period = period;
        self
    }

    /// Checks that every threshold and duration is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.failure_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "failure_threshold",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.success_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "success_threshold",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.reset_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "reset_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.monitoring_period.is_zero() {
            return Err(ConfigError::Invalid {
                field: "monitoring_period",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
