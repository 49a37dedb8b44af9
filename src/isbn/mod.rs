//! ISBN parsing and validation.
//!
//! Everything in this module is pure and stateless: it never touches the
//! network, so malformed input fails fast before a lookup is attempted.
//!
//! ## Pipeline
//!
//! 1. [`normalize`] strips separators, labels and whitespace.
//! 2. The length selects ISBN-10 or ISBN-13 rules.
//! 3. Character classes, the bookland prefix and the check digit are
//!    verified.
//! 4. Valid input is held as an [`Isbn`], always in 13-digit form.
//!
//! ## Usage
//!
//! ```rust
//! use bookbridge::isbn::{self, Isbn, IsbnFormat};
//!
//! let result = isbn::validate("0451524934");
//! assert!(result.is_valid);
//! assert_eq!(result.format, Some(IsbnFormat::Isbn10));
//! assert_eq!(result.normalized_isbn.as_deref(), Some("9780451524935"));
//!
//! let parsed = Isbn::parse("978-0-451-52493-5").unwrap();
//! assert_eq!(parsed.hyphenated(), "978-0-451-52493-5");
//! ```

mod checksum;
mod extract;
mod normalize;
mod validator;

pub use checksum::{
    isbn10_check_digit, isbn10_checksum_valid, isbn10_to_isbn13, isbn13_check_digit,
    isbn13_checksum_valid, isbn13_to_isbn10,
};
pub use extract::extract_isbn;
pub use normalize::{is_likely_isbn, normalize};
pub use validator::{
    convert_isbn10_to_isbn13, format_for_display, validate, Isbn, IsbnFormat, ValidationResult,
};
