//! Bounded textual summaries of method results and thoughts.

use serde_json::Value;

/// Maximum characters kept from a result before truncation.
const RESULT_SUMMARY_CHARS: usize = 100;

/// Maximum characters kept from a reasoning trace before truncation.
const THOUGHT_CHARS: usize = 2000;

/// Produces a bounded, human-readable summary of a method's return value.
///
/// Strings are summarized directly; every other JSON value is rendered in
/// its compact serialized form first. Summaries longer than 100 characters
/// are truncated with a trailing ellipsis.
#[must_use]
pub fn summarize_result(value: &Value) -> String {
    match value {
        Value::String(text) => truncate(text, RESULT_SUMMARY_CHARS),
        other => truncate(&other.to_string(), RESULT_SUMMARY_CHARS),
    }
}

/// Bounds a reasoning trace to 2000 characters, appending an ellipsis when
/// truncated.
#[must_use]
pub fn truncate_thought(thought: &str) -> String {
    truncate(thought, THOUGHT_CHARS)
}

fn truncate(text: &str, limit: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(limit) {
        None => text.to_owned(),
        Some((cut, _)) => {
            let mut out = text[..cut].to_owned();
            out.push_str("...");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_strings_pass_through() {
        let value = json!("Done: X");
        assert_eq!(summarize_result(&value), "Done: X");
    }

    #[test]
    fn long_strings_truncate_with_ellipsis() {
        let value = Value::String("a".repeat(150));
        let summary = summarize_result(&value);
        assert_eq!(summary.len(), 103);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn non_strings_render_compact_json() {
        let value = json!({"answer": 42});
        assert_eq!(summarize_result(&value), "{\"answer\":42}");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let value = Value::String("é".repeat(120));
        let summary = summarize_result(&value);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 103);
    }
}
