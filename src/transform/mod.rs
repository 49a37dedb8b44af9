//! Normalization of external records into the canonical book shape.
//!
//! The transformer is pure: it never touches the network and never fails
//! on bad data in the record. Each heuristic lives in its own small
//! function so the fallback rules stay visible:
//!
//! - [`parse_author_name`] - `"Surname, Given"` or whitespace tokens
//! - [`extract_categories`] - subjects, places and times, deduplicated and capped
//! - [`extract_edition_number`] / [`parse_edition_date`] - title and date heuristics
//! - [`map_language_code`] - MARC codes to language names
//!
//! The only error is an invalid ISBN handed in by the caller.

mod authors;
mod categories;
mod edition;
mod language;
mod model;
mod transformer;

pub use authors::{parse_author_name, transform_authors};
pub use categories::{extract_categories, normalize_category_name, MAX_CATEGORIES};
pub use edition::{extract_edition_number, parse_edition_date};
pub use language::{language_from_refs, map_language_code};
pub use model::{AuthorData, BookPreview, CategoryData, CategoryType, TransformedBookData};
pub use transformer::{transform_book, transform_search_result, UNKNOWN_TITLE};
