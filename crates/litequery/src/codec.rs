//! Value encoding for writes and opportunistic decoding for reads.
//!
//! Arrays and objects are stored as JSON text. On the way back every column is
//! tried as JSON first; anything that does not parse is kept as produced by
//! SQLite. A consequence is that numeric-looking text such as `"42"` comes back
//! as the number `42`.

use rusqlite::types::Value;
use serde_json::{Number, Value as JsonValue};
use tracing::trace;

/// Parses `text` as JSON.
pub fn try_decode(text: &str) -> Option<JsonValue> {
    serde_json::from_str(text).ok()
}

/// Converts one stored value into its decoded form.
pub fn decode_value(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Integer(i) => JsonValue::from(i),
        Value::Real(f) => Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(text) => try_decode(&text).unwrap_or_else(|| {
            trace!("keeping undecodable text column as-is");
            JsonValue::String(text)
        }),
        Value::Blob(bytes) => {
            let decoded = std::str::from_utf8(&bytes).ok().and_then(try_decode);
            match decoded {
                Some(value) => value,
                None => JsonValue::Array(bytes.into_iter().map(JsonValue::from).collect()),
            }
        }
    }
}

/// Converts one record value into a bindable parameter.
///
/// Booleans bind as `0`/`1`, matching SQLite's own representation.
pub fn encode_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Integer(i64::from(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Real).unwrap_or(Value::Null),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => Value::Text(value.to_string()),
    }
}
