//! JSON encoding and decoding for request payloads and response bodies.

use serde::Serialize;
use serde_json::Value;

/// Encodes a payload to JSON bytes, validating representability first.
///
/// The payload is lifted into a [`Value`] before any bytes are produced;
/// anything serde can't express as JSON (a map with non-string keys, for
/// example) is rejected at that stage. Serializing the validated `Value`
/// itself cannot fail.
pub fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(payload)?;
    serde_json::to_vec(&value)
}

/// Decodes response bytes into a JSON value.
///
/// Top-level scalar fragments (`42`, `"ok"`, `true`) are accepted alongside
/// objects and arrays, matching what JSON APIs actually return. Callers never
/// pass zero-length input here; an empty body is classified as a null success
/// before decoding is attempted.
pub fn decode(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn round_trips_every_json_kind() {
        let values = [
            json!(null),
            json!(true),
            json!(-12),
            json!(3.25),
            json!("text"),
            json!([1, "two", null]),
            json!({"nested": {"deep": [true, false]}}),
        ];
        for value in values {
            let bytes = encode(&value).unwrap();
            assert_eq!(decode(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn rejects_payloads_that_are_not_json_representable() {
        // Maps need string-convertible keys to exist as JSON objects.
        let mut weird_keys = BTreeMap::new();
        weird_keys.insert((1u8, 2u8), "value");
        assert!(encode(&weird_keys).is_err());
    }

    #[test]
    fn decodes_top_level_scalar_fragments() {
        assert_eq!(decode(b"42").unwrap(), json!(42));
        assert_eq!(decode(b"\"ok\"").unwrap(), json!("ok"));
        assert_eq!(decode(b"true").unwrap(), json!(true));
        assert_eq!(decode(b"null").unwrap(), json!(null));
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(decode(b"{not json").is_err());
        assert!(decode(b"<html></html>").is_err());
    }
}
