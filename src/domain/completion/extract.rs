//! Ordered text extraction from heterogeneous provider payloads

use serde_json::Value;

/// Pulls a candidate completion out of a decoded response body
pub type TextExtractor = fn(&Value) -> Option<&str>;

/// Runs `extractors` in order and returns the first non-blank string
pub fn first_text<'a>(value: &'a Value, extractors: &[TextExtractor]) -> Option<&'a str> {
    extractors
        .iter()
        .filter_map(|extract| extract(value))
        .find(|text| !text.trim().is_empty())
}

/// String at a JSON pointer, if present and a string
pub fn string_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}
