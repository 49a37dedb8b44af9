//! Audit event types and emission functions.

use crate::circuit_breaker::{CircuitBreakerSnapshot, CircuitState};
use crate::core::BookLookup;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base trait for audit events.
pub trait AuditEvent: Serialize {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the timestamp of the event.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Audit event for a completed single-ISBN lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupAuditEvent {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Source that served the lookup.
    pub source: String,

    /// ISBN exactly as the caller supplied it.
    pub isbn: String,

    /// Whether a record was found.
    pub success: bool,

    /// Status code of the failure, if any.
    pub status_code: Option<u16>,

    /// Failure message, if any.
    pub error: Option<String>,

    /// Wall time of the lookup including retries, in milliseconds.
    pub duration_ms: u64,
}

impl LookupAuditEvent {
    /// Builds an event from a finished lookup.
    pub fn new(
        source: impl Into<String>,
        isbn: impl Into<String>,
        lookup: &BookLookup,
        duration: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            isbn: isbn.into(),
            success: lookup.success,
            status_code: lookup.status_code,
            error: lookup.error.clone(),
            duration_ms: duration.as_millis() as u64,
        }
    }
}

impl AuditEvent for LookupAuditEvent {
    fn event_type(&self) -> &'static str {
        "lookup_completed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Audit event for a circuit breaker state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerAuditEvent {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Name of the guarded endpoint.
    pub endpoint: String,

    /// State before the transition.
    pub from: CircuitState,

    /// State after the transition.
    pub to: CircuitState,

    /// Failure count after the transition.
    pub failure_count: u32,

    /// Half-open success count after the transition.
    pub success_count: u32,
}

impl BreakerAuditEvent {
    /// Builds an event from a transition and the resulting snapshot.
    pub fn new(
        endpoint: impl Into<String>,
        from: CircuitState,
        to: CircuitState,
        snapshot: &CircuitBreakerSnapshot,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            endpoint: endpoint.into(),
            from,
            to,
            failure_count: snapshot.failure_count,
            success_count: snapshot.success_count,
        }
    }
}

impl AuditEvent for BreakerAuditEvent {
    fn event_type(&self) -> &'static str {
        "breaker_transition"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Emits an audit event for a completed lookup.
pub fn emit_lookup_completed(event: &LookupAuditEvent) {
    tracing::info!(
        target: "bookbridge::audit",
        event_type = event.event_type(),
        source = %event.source,
        isbn = %event.isbn,
        success = event.success,
        status_code = ?event.status_code,
        error = ?event.error,
        duration_ms = event.duration_ms,
        "Lookup completed"
    );
}

/// Emits an audit event for a circuit breaker state change.
pub fn emit_breaker_transition(
    endpoint: &str,
    from: CircuitState,
    to: CircuitState,
    snapshot: &CircuitBreakerSnapshot,
) {
    let event = BreakerAuditEvent::new(endpoint, from, to, snapshot);

    tracing::info!(
        target: "bookbridge::audit",
        event_type = event.event_type(),
        endpoint = %event.endpoint,
        from = %event.from,
        to = %event.to,
        failure_count = event.failure_count,
        success_count = event.success_count,
        "Circuit breaker state changed"
    );
}

/// Emits an audit event for a completed batch operation.
pub fn emit_batch_completed(
    operation: &str,
    source: &str,
    total: usize,
    succeeded: usize,
    duration: Duration,
) {
    tracing::info!(
        target: "bookbridge::audit",
        event_type = "batch_completed",
        operation = %operation,
        source = %source,
        total = total,
        succeeded = succeeded,
        failed = total.saturating_sub(succeeded),
        duration_ms = duration.as_millis() as u64,
        "Batch completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LookupError;

    #[test]
    fn test_lookup_event_from_failed_lookup() {
        let lookup = BookLookup::failed(&LookupError::not_found("Open Library"));
        let event = LookupAuditEvent::new(
            "Open Library",
            "0-451-52493-4",
            &lookup,
            Duration::from_millis(42),
        );

        assert_eq!(event.event_type(), "lookup_completed");
        assert_eq!(event.isbn, "0-451-52493-4");
        assert!(!event.success);
        assert_eq!(event.status_code, Some(404));
        assert_eq!(event.duration_ms, 42);
    }

    #[test]
    fn test_breaker_event_serializes_states() {
        let snapshot = CircuitBreakerSnapshot {
            state: CircuitState::Open,
            failure_count: 5,
            last_failure_time: None,
            success_count: 0,
        };
        let event =
            BreakerAuditEvent::new("Open Library", CircuitState::Closed, CircuitState::Open, &snapshot);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["from"], "CLOSED");
        assert_eq!(json["to"], "OPEN");
        assert_eq!(json["failure_count"], 5);
    }
}
