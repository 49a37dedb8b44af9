//! Category extraction.

use super::model::{CategoryData, CategoryType};
use crate::core::{ExternalBookRecord, NamedEntry};

use std::collections::HashSet;

/// Maximum number of categories kept per book.
pub const MAX_CATEGORIES: usize = 10;

/// Normalizes a raw subject string.
///
/// Trims, collapses whitespace runs to single spaces and uppercases the
/// first character only. Returns `None` for blank input.
pub fn normalize_category_name(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut chars = collapsed.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Collects categories from a record's subject lists.
///
/// Subjects are tagged [`CategoryType::Subject`]; subject places and times
/// are tagged [`CategoryType::Topic`]. Entries are deduplicated on the
/// case-insensitive name together with the type, in first-seen order, and
/// the result is capped at [`MAX_CATEGORIES`].
pub fn extract_categories(record: &ExternalBookRecord) -> Vec<CategoryData> {
    let sources: [(&[NamedEntry], CategoryType); 3] = [
        (record.subjects.as_slice(), CategoryType::Subject),
        (record.subject_places.as_slice(), CategoryType::Topic),
        (record.subject_times.as_slice(), CategoryType::Topic),
    ];

    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for (entries, category_type) in sources {
        for name in entries
            .iter()
            .filter_map(NamedEntry::name)
            .filter_map(normalize_category_name)
        {
            if seen.insert((name.to_lowercase(), category_type)) {
                categories.push(CategoryData::new(name, category_type));
            }
        }
    }

    categories.truncate(MAX_CATEGORIES);
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<NamedEntry> {
        names.iter().copied().map(NamedEntry::from).collect()
    }

    #[test]
    fn test_normalize_category_name() {
        assert_eq!(
            normalize_category_name("  science   fiction "),
            Some("Science fiction".into())
        );
        assert_eq!(normalize_category_name("ENGLAND"), Some("ENGLAND".into()));
        assert_eq!(normalize_category_name("éire"), Some("Éire".into()));
        assert_eq!(normalize_category_name(" \t "), None);
    }

    #[test]
    fn test_dedup_is_case_insensitive_per_type() {
        let record = ExternalBookRecord {
            subjects: entries(&["Fiction", "fiction", "FICTION"]),
            subject_places: entries(&["Fiction"]),
            ..Default::default()
        };

        let categories = extract_categories(&record);
        assert_eq!(
            categories,
            vec![
                CategoryData::new("Fiction", CategoryType::Subject),
                CategoryData::new("Fiction", CategoryType::Topic),
            ]
        );
    }

    #[test]
    fn test_places_and_times_share_topic_type() {
        let record = ExternalBookRecord {
            subject_places: entries(&["London"]),
            subject_times: entries(&["london", "20th century"]),
            ..Default::default()
        };

        let names: Vec<_> = extract_categories(&record)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["London", "20th century"]);
    }

    #[test]
    fn test_blank_entries_skipped_and_capped() {
        let subjects: Vec<String> = (0..15).map(|i| format!("topic {i}")).collect();
        let mut list: Vec<NamedEntry> = vec!["   ".into()];
        list.extend(subjects.iter().map(|s| NamedEntry::from(s.as_str())));

        let record = ExternalBookRecord {
            subjects: list,
            ..Default::default()
        };

        let categories = extract_categories(&record);
        assert_eq!(categories.len(), MAX_CATEGORIES);
        assert_eq!(categories[0].name, "Topic 0");
        assert_eq!(categories[9].name, "Topic 9");
    }
}
