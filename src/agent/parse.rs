use serde_json::{Map, Value};

/// Parse a model reply into a JSON object.
///
/// Replies that are not a JSON object degrade to `{"content": <raw text>}`.
pub fn parse_response(raw: &str) -> Map<String, Value> {
    if let Some(object) = extract_object(raw) {
        return object;
    }

    tracing::debug!("Reply is not a JSON object, wrapping {} bytes as content", raw.len());
    let mut wrapped = Map::new();
    wrapped.insert("content".to_string(), Value::String(raw.to_string()));
    wrapped
}

/// The reply as a JSON object, if the whole text is one
fn extract_object(s: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(s.trim()) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
