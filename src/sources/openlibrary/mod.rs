//! Open Library book source.
//!
//! Talks to two endpoints of the public Open Library API:
//!
//! - `GET /api/books?bibkeys=ISBN:<isbn>&format=json&jscmd=data` for
//!   single-ISBN lookups; an absent bibkey in the response means not found
//! - `GET /search.json?title=<title>&limit=<n>` for title searches
//!
//! Cover images are addressed as
//! `https://openlibrary.org/covers/isbn/<isbn>-<S|M|L>.jpg`.

mod client;
mod config;
pub mod dto;

pub use client::{OpenLibraryClient, SERVICE_NAME};
pub use config::{
    cover_url, CoverSize, OpenLibraryConfig, ParseCoverSizeError, ENV_BASE_URL,
    ENV_FAILURE_THRESHOLD, ENV_RESET_TIMEOUT_MS, ENV_TIMEOUT_MS,
};
