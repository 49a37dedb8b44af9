//! Circuit breaker implementation.

use crate::circuit_breaker::config::CircuitBreakerConfig;
use crate::circuit_breaker::state::{BreakerMetrics, CircuitBreakerSnapshot, CircuitState};
use crate::core::CircuitOpenError;

use chrono::{DateTime, Utc};
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Mutable breaker state, only ever touched under the mutex.
#[derive(Debug, Default)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    /// Monotonic time of the last failure, used for the reset timeout.
    last_failure: Option<Instant>,
    /// Wall-clock time of the last failure, reported in snapshots.
    last_failure_at: Option<DateTime<Utc>>,
    /// Bumped on every state change; outcomes of calls admitted under an
    /// older generation only touch the metrics.
    generation: u64,
    metrics: BreakerMetrics,
}

impl BreakerInner {
    fn transition(&mut self, to: CircuitState) {
        self.state = to;
        self.generation = self.generation.wrapping_add(1);
    }

    fn snapshot(&self) -> CircuitBreakerSnapshot {
        CircuitBreakerSnapshot {
            state: self.state,
            failure_count: self.failure_count,
            last_failure_time: self.last_failure_at,
            success_count: self.success_count,
        }
    }
}

/// A circuit breaker guarding one external endpoint.
///
/// The breaker wraps arbitrary async operations and tracks their outcome.
/// Each instance belongs to exactly one endpoint and lives as long as the
/// client that owns it.
///
/// # States
///
/// - **Closed**: Normal operation. Calls pass through, failures are counted.
/// - **Open**: The endpoint is failing. Calls are rejected immediately.
/// - **Half-Open**: Probing. Calls are let through; a run of successes
///   closes the circuit and a single failure reopens it.
///
/// The reset timeout is evaluated lazily on the next call; an idle breaker
/// never changes state on its own.
///
/// # Concurrency
///
/// The admission check and the outcome update each run under a mutex, so
/// concurrent calls never lose counter updates. The operation itself runs
/// outside the lock, which keeps concurrent lookups concurrent.
///
/// # Example
///
/// ```rust
/// use bookbridge::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
/// use bookbridge::core::LookupError;
///
/// # async fn demo() {
/// let breaker = CircuitBreaker::new("catalogue", CircuitBreakerConfig::default());
///
/// let result: Result<u32, LookupError> = breaker.execute(|| async { Ok(7) }).await;
/// assert_eq!(result.unwrap(), 7);
/// # }
/// ```
pub struct CircuitBreaker {
    /// Name of the guarded endpoint.
    name: String,
    /// Configuration.
    config: CircuitBreakerConfig,
    /// State, counters and metrics.
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    /// Creates a new circuit breaker for the named endpoint.
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerInner::default()),
        }
    }

    /// Creates a new circuit breaker with default configuration.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, CircuitBreakerConfig::default())
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the name of the guarded endpoint.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Returns the current state of the circuit breaker.
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// Returns a read-only snapshot of the breaker's counters.
    pub fn stats(&self) -> CircuitBreakerSnapshot {
        self.lock().snapshot()
    }

    /// Returns a copy of the current metrics.
    pub fn metrics(&self) -> BreakerMetrics {
        self.lock().metrics.clone()
    }

    /// Forces the circuit closed with all counters zeroed.
    ///
    /// An administrative override that applies regardless of the current
    /// state. Lifetime metrics are kept.
    pub fn reset(&self) {
        let mut inner = self.lock();
        let from = inner.state;
        inner.transition(CircuitState::Closed);
        inner.failure_count = 0;
        inner.success_count = 0;
        inner.last_failure = None;
        inner.last_failure_at = None;
        let snapshot = inner.snapshot();
        drop(inner);

        tracing::info!(endpoint = %self.name, from = %from, "Circuit breaker reset");
        if from != CircuitState::Closed {
            crate::audit::emit_breaker_transition(&self.name, from, CircuitState::Closed, &snapshot);
        }
    }

    /// Forces the circuit open, starting a fresh reset timeout.
    pub fn force_open(&self) {
        let mut inner = self.lock();
        let from = inner.state;
        inner.transition(CircuitState::Open);
        inner.success_count = 0;
        inner.last_failure = Some(Instant::now());
        inner.last_failure_at = Some(Utc::now());
        if from != CircuitState::Open {
            inner.metrics.record_opened();
        }
        let snapshot = inner.snapshot();
        drop(inner);

        if from != CircuitState::Open {
            crate::audit::emit_breaker_transition(&self.name, from, CircuitState::Open, &snapshot);
        }
    }

    /// Runs `operation` under the breaker.
    ///
    /// If the circuit is open and the reset timeout has not elapsed, the
    /// operation is not invoked and a [`CircuitOpenError`] is returned
    /// (converted into the caller's error type). Otherwise the operation
    /// runs and its outcome drives the state machine. Failures are returned
    /// to the caller unchanged.
    ///
    /// An outcome only moves the state machine if the breaker has not
    /// changed state since the call was admitted.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<CircuitOpenError>,
    {
        let generation = self.try_acquire()?;

        match operation().await {
            Ok(value) => {
                self.record_success(generation);
                Ok(value)
            }
            Err(e) => {
                self.record_failure(generation);
                Err(e)
            }
        }
    }

    /// Admission check; moves an expired open circuit to half-open.
    ///
    /// Returns the generation the call was admitted under.
    fn try_acquire(&self) -> Result<u64, CircuitOpenError> {
        let mut inner = self.lock();
        if inner.state != CircuitState::Open {
            return Ok(inner.generation);
        }

        let elapsed = inner.last_failure.map(|at| at.elapsed());
        match elapsed {
            Some(elapsed) if elapsed < self.config.reset_timeout => {
                inner.metrics.record_rejected();
                drop(inner);

                let retry_after = self.config.reset_timeout - elapsed;
                tracing::debug!(
                    endpoint = %self.name,
                    retry_after_ms = retry_after.as_millis() as u64,
                    "Circuit open, rejecting call"
                );
                Err(CircuitOpenError::new(&self.name, Some(retry_after)))
            }
            _ => {
                inner.transition(CircuitState::HalfOpen);
                inner.success_count = 0;
                let generation = inner.generation;
                let snapshot = inner.snapshot();
                drop(inner);

                tracing::info!(endpoint = %self.name, "Circuit half-open, probing endpoint");
                crate::audit::emit_breaker_transition(
                    &self.name,
                    CircuitState::Open,
                    CircuitState::HalfOpen,
                    &snapshot,
                );
                Ok(generation)
            }
        }
    }

    /// Records a successful call.
    fn record_success(&self, generation: u64) {
        let mut inner = self.lock();
        inner.metrics.record_success();
        if inner.generation != generation {
            return;
        }
        inner.failure_count = 0;
        inner.last_failure = None;
        inner.last_failure_at = None;

        if inner.state != CircuitState::HalfOpen {
            return;
        }

        inner.success_count += 1;
        if inner.success_count < self.config.success_threshold {
            return;
        }

        inner.transition(CircuitState::Closed);
        inner.success_count = 0;
        inner.metrics.record_closed();
        let snapshot = inner.snapshot();
        drop(inner);

        tracing::info!(endpoint = %self.name, "Circuit closed after successful probes");
        crate::audit::emit_breaker_transition(
            &self.name,
            CircuitState::HalfOpen,
            CircuitState::Closed,
            &snapshot,
        );
    }

    /// Records a failed call.
    fn record_failure(&self, generation: u64) {
        let mut inner = self.lock();
        inner.metrics.record_failure();
        if inner.generation != generation {
            return;
        }
        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure = Some(Instant::now());
        inner.last_failure_at = Some(Utc::now());
        inner.success_count = 0;

        let from = inner.state;
        let should_open = match from {
            // A single failed probe reverts trust.
            CircuitState::HalfOpen => true,
            CircuitState::Closed => inner.failure_count >= self.config.failure_threshold,
            CircuitState::Open => false,
        };

        if !should_open {
            return;
        }

        inner.transition(CircuitState::Open);
        inner.metrics.record_opened();
        let snapshot = inner.snapshot();
        drop(inner);

        tracing::warn!(
            endpoint = %self.name,
            failure_count = snapshot.failure_count,
            from = %from,
            "Circuit opened"
        );
        crate::audit::emit_breaker_transition(&self.name, from, CircuitState::Open, &snapshot);
    }
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("state", &self.lock().state)
            .field("config", &self.config)
            .finish()
    }
}
