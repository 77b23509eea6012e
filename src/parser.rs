use log::debug;
use serde_json::{Map, Value};

/// Extracts a JSON object from raw model output.
///
/// Total over arbitrary text: empty or whitespace-only input, undecodable
/// text, and decodable-but-not-an-object text all yield the empty mapping.
/// When direct decoding fails, the substring from the first `{` to the last
/// `}` (greedy, spanning newlines) is tried, which recovers objects wrapped
/// in prose, code fences or explanations.
pub fn parse_model_output(raw: &str) -> Map<String, Value> {
    if raw.trim().is_empty() {
        return Map::new();
    }

    if let Some(object) = decode_object(raw) {
        return object;
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Some(object) = decode_object(&raw[start..=end]) {
                return object;
            }
        }
    }

    debug!("Model output contained no decodable JSON object");
    Map::new()
}

fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
