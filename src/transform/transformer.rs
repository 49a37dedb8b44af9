//! Record-to-canonical mapping.

use super::authors::{parse_author_name, transform_authors};
use super::categories::extract_categories;
use super::edition::{extract_edition_number, parse_edition_date};
use super::language::language_from_refs;
use super::model::{BookPreview, TransformedBookData};
use crate::core::{BookSummary, ExternalBookRecord, NamedEntry, TransformError, TransformResult};
use crate::isbn::Isbn;

/// Title used when the record has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Maps an external record into the canonical book shape.
///
/// `isbn` must validate; anything else is a caller error reported as
/// [`TransformError::InvalidIsbnForTransformation`]. Gaps and oddities in
/// the record itself never fail: each field falls back to a default or is
/// left unset.
pub fn transform_book(record: &ExternalBookRecord, isbn: &str) -> TransformResult<TransformedBookData> {
    let isbn = Isbn::parse(isbn).map_err(|source| TransformError::InvalidIsbnForTransformation {
        isbn: isbn.to_string(),
        source,
    })?;

    let title = title_or_default(record.title.as_deref());
    let edition_number = extract_edition_number(&title);

    Ok(TransformedBookData {
        isbn_code: isbn.into_string(),
        edition_number,
        subtitle: non_blank(record.subtitle.as_deref()),
        authors: transform_authors(&record.authors),
        categories: extract_categories(record),
        edition_date: record.publish_date.as_deref().and_then(parse_edition_date),
        publishers: names(&record.publishers),
        pages: record.number_of_pages,
        language: language_from_refs(&record.languages),
        cover_urls: record.cover.clone().filter(|cover| !cover.is_empty()),
        description: non_blank(record.description.as_ref().map(|d| d.as_str())),
        physical_format: non_blank(record.physical_format.as_deref()),
        weight: non_blank(record.weight.as_deref()),
        dimensions: non_blank(record.physical_dimensions.as_deref()),
        title,
    })
}

/// Maps a search hit into a light preview.
///
/// The first listed ISBN that validates becomes `isbn_code`.
pub fn transform_search_result(summary: &BookSummary) -> BookPreview {
    BookPreview {
        isbn_code: summary
            .isbns
            .iter()
            .find_map(|raw| Isbn::parse(raw).ok())
            .map(Isbn::into_string),
        title: title_or_default(Some(&summary.title)),
        authors: summary.authors.iter().map(|a| parse_author_name(a)).collect(),
        publish_year: summary.publish_year,
    }
}

fn title_or_default(title: Option<&str>) -> String {
    non_blank(title).unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn names(entries: &[NamedEntry]) -> Option<Vec<String>> {
    let names: Vec<String> = entries
        .iter()
        .filter_map(|entry| non_blank(entry.name()))
        .collect();
    (!names.is_empty()).then_some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AuthorEntry, CoverUrls, IsbnError, TextValue};
    use crate::transform::CategoryType;
    use chrono::NaiveDate;

    const ISBN: &str = "9780451524935";

    fn full_record() -> ExternalBookRecord {
        serde_json::from_str(
            r#"{
                "title": "  Nineteen Eighty-Four, 2nd Edition ",
                "subtitle": "A Novel",
                "authors": [{"name": "George Orwell"}],
                "subjects": ["dystopian   fiction", {"name": "Totalitarianism"}],
                "subject_places": ["London"],
                "subject_times": ["1984"],
                "publishers": [{"name": "Signet Classic"}, {"name": " "}],
                "publish_date": "July 1, 1950",
                "languages": [{"key": "/languages/eng"}],
                "number_of_pages": 328,
                "physical_format": "Mass Market Paperback",
                "physical_dimensions": "7 x 4.2 x 0.8 inches",
                "weight": "5.6 ounces",
                "cover": {"small": "s.jpg", "medium": "m.jpg", "large": "l.jpg"},
                "description": {"type": "/type/text", "value": "A dystopian novel."}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_record() {
        let book = transform_book(&full_record(), "0-451-52493-4").unwrap();

        assert_eq!(book.isbn_code, ISBN);
        assert_eq!(book.title, "Nineteen Eighty-Four, 2nd Edition");
        assert_eq!(book.subtitle.as_deref(), Some("A Novel"));
        assert_eq!(book.edition_number, Some(2));
        assert_eq!(book.edition_date, NaiveDate::from_ymd_opt(1950, 7, 1));
        assert_eq!(book.authors[0].name, "George");
        assert_eq!(book.authors[0].surname, "Orwell");
        assert_eq!(book.categories.len(), 4);
        assert_eq!(book.categories[0].name, "Dystopian fiction");
        assert_eq!(book.categories[2].category_type, CategoryType::Topic);
        assert_eq!(book.publishers, Some(vec!["Signet Classic".to_string()]));
        assert_eq!(book.pages, Some(328));
        assert_eq!(book.language.as_deref(), Some("English"));
        assert_eq!(book.description.as_deref(), Some("A dystopian novel."));
        assert_eq!(book.dimensions.as_deref(), Some("7 x 4.2 x 0.8 inches"));
        assert_eq!(book.weight.as_deref(), Some("5.6 ounces"));
        assert_eq!(
            book.cover_urls.unwrap().large.as_deref(),
            Some("l.jpg")
        );
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let book = transform_book(&ExternalBookRecord::default(), ISBN).unwrap();

        assert_eq!(book.title, UNKNOWN_TITLE);
        assert!(book.authors.is_empty());
        assert!(book.categories.is_empty());
        assert_eq!(book.edition_number, None);
        assert_eq!(book.edition_date, None);
        assert_eq!(book.publishers, None);
        assert_eq!(book.language, None);
        assert_eq!(book.cover_urls, None);
    }

    #[test]
    fn test_blank_fields_are_unset() {
        let record = ExternalBookRecord {
            title: Some("   ".into()),
            subtitle: Some("".into()),
            description: Some(TextValue::Plain("  ".into())),
            cover: Some(CoverUrls::default()),
            publish_date: Some("n.d.".into()),
            ..Default::default()
        };

        let book = transform_book(&record, ISBN).unwrap();
        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.subtitle, None);
        assert_eq!(book.description, None);
        assert_eq!(book.cover_urls, None);
        assert_eq!(book.edition_date, None);
    }

    #[test]
    fn test_author_examples() {
        let record = ExternalBookRecord {
            authors: vec![AuthorEntry::named("Smith, Jane"), AuthorEntry::named("Cher")],
            ..Default::default()
        };

        let book = transform_book(&record, ISBN).unwrap();
        assert_eq!(
            (book.authors[0].name.as_str(), book.authors[0].surname.as_str()),
            ("Jane", "Smith")
        );
        assert_eq!(
            (book.authors[1].name.as_str(), book.authors[1].surname.as_str()),
            ("Cher", "")
        );
    }

    #[test]
    fn test_invalid_isbn_is_rejected() {
        let err = transform_book(&full_record(), "invalid-isbn").unwrap_err();
        let TransformError::InvalidIsbnForTransformation { isbn, source } = err;

        assert_eq!(isbn, "invalid-isbn");
        assert_eq!(source, IsbnError::InvalidLength { actual: 11 });
    }

    #[test]
    fn test_search_result_preview() {
        let summary = BookSummary {
            title: "".into(),
            authors: vec!["Orwell, George".into()],
            isbns: vec!["garbage".into(), "0451524934".into()],
            publish_year: Some(1949),
            key: None,
        };

        let preview = transform_search_result(&summary);
        assert_eq!(preview.isbn_code.as_deref(), Some(ISBN));
        assert_eq!(preview.title, UNKNOWN_TITLE);
        assert_eq!(preview.authors[0].surname, "Orwell");
        assert_eq!(preview.publish_year, Some(1949));
    }
}
