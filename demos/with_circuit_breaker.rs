//! Circuit breaker example demonstrating resilience patterns.
//!
//! This example shows how to:
//! - Configure failure thresholds and timeouts
//! - Watch an unreachable endpoint trip the breaker
//! - Handle open circuit states
//! - Recover through the half-open probe
//!
//! Run with: cargo run --example with_circuit_breaker

use bookbridge::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Circuit Breaker Example ===\n");

    // Configure the circuit breaker
    let cb_config = CircuitBreakerConfig::default()
        .with_failure_threshold(3) // Open after 3 failed attempts
        .with_success_threshold(3) // Close after 3 successes in half-open
        .with_reset_timeout(Duration::from_secs(2));

    println!("Circuit Breaker Configuration:");
    println!("  Failure threshold: {}", cb_config.failure_threshold);
    println!("  Success threshold: {}", cb_config.success_threshold);
    println!("  Reset timeout: {:?}", cb_config.reset_timeout);
    println!();

    // Nothing listens on this port, so every attempt is a network failure
    let config = OpenLibraryConfig::default()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_millis(500))
        .with_circuit_breaker(cb_config.clone());
    let client = OpenLibraryClient::new(config)?;

    println!("Sending lookups to an unreachable server...\n");

    for i in 1..=3 {
        let lookup = client.fetch_book_by_isbn("0451524934").await;
        let stats = client.breaker_stats();
        let metrics = client.breaker_metrics();

        println!("Lookup #{}: success = {}", i, lookup.success);
        println!("  error: {:?}, status: {:?}", lookup.error, lookup.status_code);
        println!(
            "  state = {}, failures = {}, rejected = {}",
            stats.state, stats.failure_count, metrics.rejected_requests
        );
    }

    // Invalid input never reaches the breaker
    let lookup = client.fetch_book_by_isbn("not-an-isbn").await;
    println!("\nInvalid ISBN: {:?}", lookup.error);

    client.reset_breaker();
    println!("After reset: {}", client.breaker_stats().state);

    println!("\n=== Demonstrating Recovery ===\n");

    let breaker = CircuitBreaker::new("demo", cb_config);
    breaker.force_open();
    println!("Forced circuit to {}", breaker.state());

    let rejected: Result<(), LookupError> = breaker.execute(|| async { Ok(()) }).await;
    println!("Immediate call: {:?}", rejected.err().map(|e| e.to_string()));

    tokio::time::sleep(Duration::from_millis(2100)).await;

    for i in 1..=3 {
        let result: Result<u32, LookupError> = breaker.execute(|| async { Ok(i) }).await;
        println!("Probe #{}: {:?} -> state {}", i, result, breaker.state());
    }

    println!("\nFinal metrics: {:?}", breaker.metrics());
    println!("\n=== Example Complete ===");
    Ok(())
}
