//! Response body decoding
//!
//! Maps raw JSON bytes onto serde types, unwrapping an optional root key.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a raw body as JSON. An empty (or whitespace-only) body is `null`.
pub fn parse_json(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON: {e}"),
    })
}

/// Decode a parsed JSON value into `T`, unwrapping `root_key` when the
/// value is an object that contains it.
pub fn decode_value<T: DeserializeOwned>(value: Value, root_key: Option<&str>) -> Result<T> {
    let value = match (root_key, value) {
        (Some(key), Value::Object(mut map)) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        (_, value) => value,
    };

    serde_json::from_value(value).map_err(|e| Error::Decode {
        message: format!("Failed to decode {}: {e}", std::any::type_name::<T>()),
    })
}

/// Decode a raw response body into `T`.
///
/// Malformed JSON and type mismatches are reported as [`Error::Decode`].
pub fn decode_into<T: DeserializeOwned>(body: &[u8], root_key: Option<&str>) -> Result<T> {
    decode_value(parse_json(body)?, root_key)
}
