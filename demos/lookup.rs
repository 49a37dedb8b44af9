//! ISBN lookup example.
//!
//! This example shows how to:
//! - Validate and format raw ISBN input
//! - Look up books in Open Library
//! - Normalize the result into the canonical book shape
//!
//! Run with: cargo run --example lookup -- 0451524934 "978-0-306-40615-7"
//!
//! Set `OPEN_LIBRARY_BASE_URL` to point at a different server.

use bookbridge::isbn;
use bookbridge::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG=bookbridge=debug shows retries and audit events
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookbridge=info")),
        )
        .init();

    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = vec!["0451524934".to_string(), "9780451524934".to_string()];
    }

    println!("=== Validation ===\n");
    for input in &inputs {
        let result = isbn::validate(input);
        match (&result.normalized_isbn, &result.error) {
            (Some(normalized), _) => println!(
                "{:<20} valid {} -> {}",
                input,
                result.format.map(|f| f.as_str()).unwrap_or("?"),
                isbn::format_for_display(normalized)
            ),
            (None, Some(error)) => println!("{:<20} invalid: {}", input, error),
            (None, None) => println!("{:<20} invalid", input),
        }
    }

    let client = OpenLibraryClient::new(OpenLibraryConfig::from_env()?)?;

    let health = client.health_check().await;
    println!("\nOpen Library available: {} ({:?} ms)", health.available, health.response_time_ms);

    println!("\n=== Import ===\n");
    let manager = MetadataManager::new(client);
    let report = manager.import_books(&inputs).await;

    for input in &inputs {
        match report.get(input) {
            Some(Ok(book)) => {
                println!("{}: {}", input, book.title);
                for author in &book.authors {
                    println!("  author:   {} / {}", author.name, author.surname);
                }
                for category in &book.categories {
                    println!("  category: {} ({})", category.name, category.category_type);
                }
                if let Some(date) = book.edition_date {
                    println!("  edition:  {}", date);
                }
                if let Ok(cover) = manager.source().cover_url(&book.isbn_code, CoverSize::L) {
                    println!("  cover:    {}", cover);
                }
            }
            Some(Err(e)) => println!("{}: failed ({})", input, e),
            None => {}
        }
    }

    println!(
        "\n{} imported, {} failed. Breaker: {:?}",
        report.succeeded,
        report.failed,
        manager.source().breaker_stats().state
    );
    Ok(())
}
