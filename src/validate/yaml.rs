//! YAML document splitting and parsing shared by the manifest and pipeline
//! validators.

use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

static DOCUMENT_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^---(?:[ \t].*)?\r?$").expect("document separator regex is valid")
});

/// Split a multi-document YAML stream on `---` lines.
///
/// Documents that are blank or only comments are dropped.
pub(super) fn documents(content: &str) -> Vec<&str> {
    DOCUMENT_SEPARATOR
        .split(content)
        .filter(|doc| has_content(doc))
        .collect()
}

/// Parse one YAML document, rendering failures as a short message.
pub(super) fn parse(document: &str) -> std::result::Result<Value, String> {
    serde_yaml::from_str::<Value>(document).map_err(|e| format!("YAML syntax error: {}", e))
}

/// The mapping value at `key`, if the value is a mapping with that key.
pub(super) fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_mapping().and_then(|m| m.get(key))
}

/// A scalar or nested field is "present" when it exists and is not null.
pub(super) fn has(value: &Value, key: &str) -> bool {
    field(value, key).is_some_and(|v| !v.is_null())
}

fn has_content(document: &str) -> bool {
    document.lines().any(|line| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#') && trimmed != "..."
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_splits_and_drops_empty() {
        let docs = documents("---\n# comment only\n---\na: 1\n--- # trailing\nb: 2\n");
        assert_eq!(docs.len(), 2);
        assert!(docs[0].contains("a: 1"));
        assert!(docs[1].contains("b: 2"));
    }

    #[test]
    fn test_indented_dashes_do_not_split() {
        let docs = documents("a: |\n  ---\n  text\n");
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_parse_reports_syntax_error() {
        let err = parse("a: [1, 2\n").unwrap_err();
        assert!(err.starts_with("YAML syntax error"));
    }

    #[test]
    fn test_field_lookup() {
        let value = parse("metadata:\n  name: web\nspec: ~\n").unwrap();
        let metadata = field(&value, "metadata").unwrap();
        assert!(has(metadata, "name"));
        assert!(!has(&value, "spec"));
        assert!(field(&value, "missing").is_none());
    }
}
