//! Parsing of model output that should be JSON but may arrive fenced.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::AiResponseError;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^```(?:json)?\s*").expect("valid fence regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid fence regex"));

/// Parse `text` as JSON, retrying once with a markdown code fence removed.
///
/// The error carries the syntax error of the second attempt.
pub fn parse_lenient_json(text: &str) -> Result<Value, AiResponseError> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let unfenced = LEADING_FENCE.replace(trimmed, "");
    let unfenced = TRAILING_FENCE.replace(&unfenced, "");
    serde_json::from_str(unfenced.trim()).map_err(AiResponseError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_json() {
        let value = parse_lenient_json("  {\"a\": 1}\n").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn strips_json_tagged_fence() {
        let value = parse_lenient_json("```json\n{\"estimated_time\": 7}\n```").unwrap();
        assert_eq!(value, json!({"estimated_time": 7}));
    }

    #[test]
    fn strips_untagged_and_uppercase_fences() {
        assert_eq!(
            parse_lenient_json("```\n[1, 2]\n```").unwrap(),
            json!([1, 2])
        );
        assert_eq!(
            parse_lenient_json("```JSON {\"ok\": true} ```").unwrap(),
            json!({"ok": true})
        );
    }

    #[test]
    fn reports_parse_error_when_both_attempts_fail() {
        let err = parse_lenient_json("```json\n{\"a\": \n```").unwrap_err();
        assert!(matches!(err, AiResponseError::Parse(_)));

        let err = parse_lenient_json("Sure! Here is your JSON: {}").unwrap_err();
        assert!(matches!(err, AiResponseError::Parse(_)));
    }

    #[test]
    fn does_not_extract_fence_from_surrounding_prose() {
        assert!(parse_lenient_json("text\n```json\n{}\n```").is_err());
    }
}
