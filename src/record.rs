//! Access to the error object carried by a log record.

use serde_json::{Map, Value as JsonValue};

use crate::constants::KNOWN_FIELDS;

/// Field of a wrapper log record that holds the error object.
pub const ERROR_FIELD: &str = "err";

/// Known fields rendered as header lines, in output order.
pub const HEADER_FIELDS: [&str; 4] = ["name", "message", "code", "signal"];

/// Returns `true` when `record` is a log record wrapping an error object.
pub fn is_error(record: &JsonValue) -> bool {
    matches!(record.get(ERROR_FIELD), Some(JsonValue::Object(_)))
}

/// Independent copy of the error object inside `record`.
///
/// With `raw` the record itself is the error object. Returns `None` when
/// there is no object to render.
pub fn error_snapshot(record: &JsonValue, raw: bool) -> Option<Map<String, JsonValue>> {
    let err = if raw { record } else { record.get(ERROR_FIELD)? };
    err.as_object().cloned()
}

/// Present, non-null header fields in fixed order.
pub fn header_fields(err: &Map<String, JsonValue>) -> Vec<(&'static str, &JsonValue)> {
    HEADER_FIELDS
        .iter()
        .filter_map(|&key| match err.get(key) {
            None | Some(JsonValue::Null) => None,
            Some(value) => Some((key, value)),
        })
        .collect()
}

/// Every other non-null field, in the object's key order.
pub fn custom_fields(err: &Map<String, JsonValue>) -> Vec<(&str, &JsonValue)> {
    err.iter()
        .filter(|(key, value)| !KNOWN_FIELDS.contains(&key.as_str()) && !value.is_null())
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

/// Raw stack text, when present as a non-empty string.
pub fn stack_text(err: &Map<String, JsonValue>) -> Option<&str> {
    err.get("stack")
        .and_then(JsonValue::as_str)
        .filter(|stack| !stack.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn detects_wrapped_errors() {
        assert!(is_error(&json!({"level": 50, "err": {"message": "x"}})));
        assert!(!is_error(&json!({"level": 30, "msg": "hello"})));
        assert!(!is_error(&json!({"err": "not an object"})));
        assert!(!is_error(&json!({"err": null})));
        assert!(!is_error(&json!([1, 2])));
    }

    #[test]
    fn snapshot_selects_wrapped_or_raw_object() {
        let record = json!({"err": {"message": "inner"}, "message": "outer"});
        let wrapped = error_snapshot(&record, false).unwrap();
        assert_eq!(wrapped["message"], json!("inner"));

        let raw = error_snapshot(&record, true).unwrap();
        assert_eq!(raw["message"], json!("outer"));

        assert!(error_snapshot(&json!("text"), true).is_none());
    }

    #[test]
    fn header_fields_keep_fixed_order_and_skip_nulls() {
        let err = json!({"signal": "SIGTERM", "code": 7, "message": null, "name": "E"});
        let fields = header_fields(err.as_object().unwrap());
        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["name", "code", "signal"]);
    }

    #[test]
    fn custom_fields_follow_key_order() {
        let err = json!({"zeta": 1, "stack": "s", "alpha": null, "name": "E", "beta": "b"});
        let fields = custom_fields(err.as_object().unwrap());
        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["zeta", "beta"]);
    }

    #[test]
    fn stack_text_requires_non_empty_string() {
        assert_eq!(stack_text(json!({"stack": "a"}).as_object().unwrap()), Some("a"));
        assert_eq!(stack_text(json!({"stack": ""}).as_object().unwrap()), None);
        assert_eq!(stack_text(json!({"stack": 3}).as_object().unwrap()), None);
    }
}
