//! ISBN validation and the validated `Isbn` type.

use crate::core::error::{IsbnError, IsbnResult};
use crate::isbn::checksum::{
    isbn10_checksum_valid, isbn10_to_isbn13, isbn13_checksum_valid, isbn13_to_isbn10,
};
use crate::isbn::normalize::normalize;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The format an ISBN was supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IsbnFormat {
    /// Ten characters, mod-11 check character.
    #[serde(rename = "ISBN-10")]
    Isbn10,
    /// Thirteen digits, mod-10 check digit.
    #[serde(rename = "ISBN-13")]
    Isbn13,
}

impl IsbnFormat {
    /// Returns the display label (`"ISBN-10"` / `"ISBN-13"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isbn10 => "ISBN-10",
            Self::Isbn13 => "ISBN-13",
        }
    }
}

impl fmt::Display for IsbnFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checksum-validated ISBN, always held in its 13-digit form.
///
/// The only way to obtain one is [`Isbn::parse`], so holding an `Isbn`
/// proves the identifier validated. ISBN-10 input is converted to the
/// `978`-prefixed ISBN-13 equivalent; the original format is remembered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn {
    digits: String,
    source_format: IsbnFormat,
}

impl Isbn {
    /// Normalizes and validates raw input.
    ///
    /// # Errors
    ///
    /// Returns the first [`IsbnError`] hit by the validation pipeline:
    /// required, usable characters, length, character class, prefix,
    /// checksum.
    pub fn parse(raw: &str) -> IsbnResult<Self> {
        if raw.trim().is_empty() {
            return Err(IsbnError::IsbnRequired);
        }

        let normalized = normalize(raw).map_err(|e| match e {
            IsbnError::EmptyInput => IsbnError::IsbnRequired,
            other => other,
        })?;

        match normalized.len() {
            10 => Self::parse_isbn10(&normalized),
            13 => Self::parse_isbn13(&normalized),
            actual => Err(IsbnError::InvalidLength { actual }),
        }
    }

    fn parse_isbn10(normalized: &str) -> IsbnResult<Self> {
        let bytes = normalized.as_bytes();
        let body_ok = bytes[..9].iter().all(u8::is_ascii_digit);
        let check_ok = bytes[9].is_ascii_digit() || bytes[9] == b'X';
        if !body_ok || !check_ok {
            return Err(IsbnError::InvalidIsbn10Characters);
        }

        if !isbn10_checksum_valid(normalized) {
            return Err(IsbnError::InvalidIsbn10Checksum);
        }

        let digits = isbn10_to_isbn13(normalized).ok_or(IsbnError::InvalidIsbn10Checksum)?;
        Ok(Self {
            digits,
            source_format: IsbnFormat::Isbn10,
        })
    }

    fn parse_isbn13(normalized: &str) -> IsbnResult<Self> {
        if !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IsbnError::DigitsOnly);
        }

        let prefix = &normalized[..3];
        if prefix != "978" && prefix != "979" {
            return Err(IsbnError::InvalidPrefix {
                prefix: prefix.to_string(),
            });
        }

        if !isbn13_checksum_valid(normalized) {
            return Err(IsbnError::InvalidIsbn13Checksum);
        }

        Ok(Self {
            digits: normalized.to_string(),
            source_format: IsbnFormat::Isbn13,
        })
    }

    /// Returns the 13-digit form.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Returns the format the ISBN was supplied in.
    pub fn source_format(&self) -> IsbnFormat {
        self.source_format
    }

    /// Returns the ISBN-10 form, if one exists (`978` prefix only).
    pub fn to_isbn10(&self) -> Option<String> {
        isbn13_to_isbn10(&self.digits)
    }

    /// Returns the source lookup key, `ISBN:<13 digits>`.
    pub fn bibkey(&self) -> String {
        format!("ISBN:{}", self.digits)
    }

    /// Returns the hyphenated `3-1-3-5-1` display form.
    pub fn hyphenated(&self) -> String {
        let d = &self.digits;
        format!(
            "{}-{}-{}-{}-{}",
            &d[..3],
            &d[3..4],
            &d[4..7],
            &d[7..12],
            &d[12..]
        )
    }

    /// Consumes the value and returns the 13-digit string.
    pub fn into_string(self) -> String {
        self.digits
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.digits
    }
}

impl Serialize for Isbn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits)
    }
}

impl<'de> Deserialize<'de> for Isbn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Outcome of validating raw ISBN input.
///
/// Exactly one of `normalized_isbn` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the input validated.
    pub is_valid: bool,
    /// The 13-digit normalized form, on success.
    pub normalized_isbn: Option<String>,
    /// The format the input was supplied in, on success.
    pub format: Option<IsbnFormat>,
    /// Why validation failed.
    pub error: Option<String>,
}

impl From<IsbnResult<Isbn>> for ValidationResult {
    fn from(result: IsbnResult<Isbn>) -> Self {
        match result {
            Ok(isbn) => Self {
                is_valid: true,
                format: Some(isbn.source_format()),
                normalized_isbn: Some(isbn.into_string()),
                error: None,
            },
            Err(e) => Self {
                is_valid: false,
                normalized_isbn: None,
                format: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Validates raw ISBN input.
///
/// ISBN-10 input that validates reports `format = ISBN-10` but its
/// `normalized_isbn` is the 13-digit equivalent.
pub fn validate(raw: &str) -> ValidationResult {
    Isbn::parse(raw).into()
}

/// Formats an ISBN as `978-0-451-52493-5`.
///
/// Invalid input is returned unchanged.
pub fn format_for_display(raw: &str) -> String {
    match Isbn::parse(raw) {
        Ok(isbn) => isbn.hyphenated(),
        Err(_) => raw.to_string(),
    }
}

/// Converts a valid ISBN-10 to its ISBN-13 form.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidLength`] if the input is a valid ISBN-13
/// rather than an ISBN-10, or any other validation failure.
pub fn convert_isbn10_to_isbn13(raw: &str) -> IsbnResult<String> {
    let isbn = Isbn::parse(raw)?;
    match isbn.source_format() {
        IsbnFormat::Isbn10 => Ok(isbn.into_string()),
        IsbnFormat::Isbn13 => Err(IsbnError::InvalidLength { actual: 13 }),
    }
}
