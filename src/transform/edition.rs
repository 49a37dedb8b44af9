//! Edition number and date heuristics.
//!
//! Both parsers recover from malformed input by returning `None`; they
//! never fail the transformation.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EDITION_ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)(?:st|nd|rd|th)\s+edition").expect("valid edition pattern")
});

static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}").expect("valid year pattern"));

/// Full-date layouts tried in order. Month names match long or short forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%m/%d/%Y",
];

/// Month-precision layouts, read as the first day of the month.
const MONTH_FORMATS: &[&str] = &["%B %Y", "%B, %Y", "%Y-%m"];

/// Extracts the edition number from a title such as `"Rust, 3rd Edition"`.
pub fn extract_edition_number(title: &str) -> Option<u32> {
    EDITION_ORDINAL
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses a free-form publish date.
///
/// A full or month-precision date is used as is (day 1 for the latter).
/// Failing that, the first four-digit run is taken as a year and mapped to
/// January 1 of that year.
pub fn parse_edition_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }

    // chrono needs a day, so month-precision input gets one prepended.
    let with_day = format!("1 {raw}");
    if let Some(date) = MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_day, &format!("%d {fmt}")).ok())
    {
        return Some(date);
    }

    FOUR_DIGITS
        .find(raw)
        .and_then(|m| m.as_str().parse().ok())
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_edition_number() {
        assert_eq!(extract_edition_number("The Rust Book, 3rd edition"), Some(3));
        assert_eq!(extract_edition_number("Calculus (2ND EDITION)"), Some(2));
        assert_eq!(extract_edition_number("Algorithms 21st  Edition"), Some(21));
        assert_eq!(extract_edition_number("Second edition"), None);
        assert_eq!(extract_edition_number("1984"), None);
    }

    #[test]
    fn test_full_dates() {
        assert_eq!(parse_edition_date("1949-06-08"), ymd(1949, 6, 8));
        assert_eq!(parse_edition_date("June 8, 1949"), ymd(1949, 6, 8));
        assert_eq!(parse_edition_date("Jun 8, 1949"), ymd(1949, 6, 8));
        assert_eq!(parse_edition_date("8 June 1949"), ymd(1949, 6, 8));
    }

    #[test]
    fn test_month_precision() {
        assert_eq!(parse_edition_date("June 1949"), ymd(1949, 6, 1));
        assert_eq!(parse_edition_date("1949-06"), ymd(1949, 6, 1));
    }

    #[test]
    fn test_year_fallback() {
        assert_eq!(parse_edition_date("1949"), ymd(1949, 1, 1));
        assert_eq!(parse_edition_date("c1949, printed 1950"), ymd(1949, 1, 1));
        assert_eq!(parse_edition_date("2005-13-45"), ymd(2005, 1, 1));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_edition_date(""), None);
        assert_eq!(parse_edition_date("unknown"), None);
        assert_eq!(parse_edition_date("19th century"), None);
    }
}
