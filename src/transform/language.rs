//! Language code mapping.

use crate::core::LanguageRef;

/// Maps a MARC-style three-letter code to an English language name.
///
/// Unknown codes are returned unchanged.
pub fn map_language_code(code: &str) -> String {
    let name = match code {
        "eng" => "English",
        "spa" => "Spanish",
        "fre" => "French",
        "ger" => "German",
        "ita" => "Italian",
        "por" => "Portuguese",
        "rus" => "Russian",
        "jpn" => "Japanese",
        "chi" => "Chinese",
        "ara" => "Arabic",
        other => other,
    };
    name.to_string()
}

/// Resolves the language of a record from its first language reference.
///
/// Keys look like `/languages/eng`; only the trailing segment is mapped.
pub fn language_from_refs(languages: &[LanguageRef]) -> Option<String> {
    let key = languages.first()?.key()?;
    let code = key.rsplit('/').next().unwrap_or(key).trim();
    if code.is_empty() {
        return None;
    }
    Some(map_language_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(map_language_code("eng"), "English");
        assert_eq!(map_language_code("chi"), "Chinese");
        assert_eq!(map_language_code("wel"), "wel");
    }

    #[test]
    fn test_first_ref_wins() {
        let refs: Vec<LanguageRef> =
            serde_json::from_str(r#"[{"key": "/languages/fre"}, {"key": "/languages/eng"}]"#)
                .unwrap();
        assert_eq!(language_from_refs(&refs), Some("French".into()));
    }

    #[test]
    fn test_plain_and_missing() {
        let refs: Vec<LanguageRef> = serde_json::from_str(r#"["ger"]"#).unwrap();
        assert_eq!(language_from_refs(&refs), Some("German".into()));
        assert_eq!(language_from_refs(&[]), None);
    }
}
