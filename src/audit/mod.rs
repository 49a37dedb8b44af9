//! Structured audit logging.
//!
//! This module provides functions for emitting structured audit events
//! using the `tracing` crate on the `bookbridge::audit` target. Events can
//! be captured by any tracing subscriber (JSON file, OpenTelemetry, etc.).

mod events;

pub use events::{
    emit_batch_completed, emit_breaker_transition, emit_lookup_completed, AuditEvent,
    BreakerAuditEvent, LookupAuditEvent,
};
