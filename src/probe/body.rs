//! Response body interpretation.

use serde_json::Value;

use super::result::{BodySummary, Meetings};

/// Maximum number of characters kept from a non-JSON body.
pub const EXCERPT_CHARS: usize = 500;

/// Marker appended to a truncated excerpt.
pub const TRUNCATION_MARKER: &str = "...";

/// Field holding the API's primary data.
pub const PAYLOAD_FIELD: &str = "payLoad";

/// Interpret a response body: parse it as JSON when possible, otherwise
/// keep a text excerpt.
pub fn summarize(status_code: u16, bytes: &[u8]) -> BodySummary {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => {
            let meetings = extract_meetings(status_code, &value);
            BodySummary::Json { value, meetings }
        }
        Err(_) => BodySummary::Text(excerpt(&String::from_utf8_lossy(bytes))),
    }
}

/// Pull the meeting count and sample out of a `payLoad` field. Only a 200
/// response with a non-empty `payLoad` counts.
pub fn extract_meetings(status_code: u16, value: &Value) -> Meetings {
    if status_code != 200 {
        return Meetings::NotAvailable;
    }

    match value.get(PAYLOAD_FIELD) {
        Some(Value::Array(items)) if !items.is_empty() => Meetings::Found {
            count: items.len(),
            sample: items.first().cloned(),
        },
        Some(payload) if is_truthy(payload) => Meetings::Found {
            count: 1,
            sample: None,
        },
        _ => Meetings::NotAvailable,
    }
}

/// Keep the first [`EXCERPT_CHARS`] characters, appending
/// [`TRUNCATION_MARKER`] only when something was cut.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Whether a JSON value counts as present: non-null, non-false, non-zero
/// and non-empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn array_payload_counts_entries() {
        let summary = summarize(200, br#"{"payLoad": [{"id": 1}, {"id": 2}]}"#);
        match summary {
            BodySummary::Json { meetings, .. } => assert_eq!(
                meetings,
                Meetings::Found {
                    count: 2,
                    sample: Some(json!({"id": 1}))
                }
            ),
            other => panic!("expected json summary, got {other:?}"),
        }
    }

    #[test]
    fn object_payload_counts_as_one_without_sample() {
        let meetings = extract_meetings(200, &json!({"payLoad": {"venue": "Flemington"}}));
        assert_eq!(meetings, Meetings::Found { count: 1, sample: None });
    }

    #[test]
    fn empty_or_missing_payload_is_not_available() {
        assert_eq!(extract_meetings(200, &json!({"payLoad": []})), Meetings::NotAvailable);
        assert_eq!(extract_meetings(200, &json!({"payLoad": null})), Meetings::NotAvailable);
        assert_eq!(extract_meetings(200, &json!({"other": 1})), Meetings::NotAvailable);
        assert_eq!(extract_meetings(200, &json!([1, 2, 3])), Meetings::NotAvailable);
    }

    #[test]
    fn non_200_status_is_not_available() {
        let meetings = extract_meetings(403, &json!({"payLoad": [{"id": 1}]}));
        assert_eq!(meetings, Meetings::NotAvailable);
    }

    #[test]
    fn non_json_body_becomes_text() {
        let summary = summarize(502, b"<html>Bad Gateway</html>");
        assert_eq!(summary, BodySummary::Text("<html>Bad Gateway</html>".to_string()));
    }

    #[test]
    fn long_text_is_truncated_to_exact_length() {
        let body = "x".repeat(EXCERPT_CHARS + 1);
        let out = excerpt(&body);
        assert_eq!(out.len(), EXCERPT_CHARS + TRUNCATION_MARKER.len());
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert_eq!(&out[..EXCERPT_CHARS], &body[..EXCERPT_CHARS]);
    }

    #[test]
    fn text_at_limit_is_verbatim() {
        let body = "y".repeat(EXCERPT_CHARS);
        assert_eq!(excerpt(&body), body);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = "é".repeat(EXCERPT_CHARS + 10);
        let out = excerpt(&body);
        assert_eq!(out.chars().count(), EXCERPT_CHARS + TRUNCATION_MARKER.len());
    }

    #[test]
    fn truthiness_follows_emptiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!({"a": 1})));
    }
}
