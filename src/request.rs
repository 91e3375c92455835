//! Request assembly.
//!
//! A [`RequestDescriptor`] is the fully formed, ready-to-send request:
//! method, final URL string, headers, and optional body bytes. Descriptors
//! are built fresh for every call and owned by that call alone.

use crate::{codec, urls, Error, Result};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A fully assembled HTTP request, ready for submission.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// The HTTP method.
    pub method: Method,

    /// The final URL string, query parameters already merged in.
    ///
    /// Kept as a string so that an empty builder result is representable;
    /// the transport parses it at submission time.
    pub url: String,

    /// Request headers. `Content-Type` and `Accept` default to
    /// `application/json` unless the caller overrode them.
    pub headers: HeaderMap,

    /// JSON body bytes, when a payload was supplied.
    pub body: Option<Vec<u8>>,
}

/// Assembles a request descriptor from its parts.
///
/// The URL is resolved through [`urls::build`]; a bad base propagates as
/// [`Error::InvalidUrl`]. The JSON defaults for `Content-Type` and `Accept`
/// are set first and caller headers are overlaid after, so a caller entry
/// with a colliding name wins. A payload that is not representable as JSON
/// fails the whole assembly with [`Error::PayloadSerialization`] before any
/// serialization output exists.
pub fn assemble<P: Serialize>(
    method: Method,
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&P>,
    headers: Option<&HashMap<String, String>>,
) -> Result<RequestDescriptor> {
    let url = urls::build(url, params)?;

    let mut header_map = HeaderMap::new();
    header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    header_map.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(extra) = headers {
        for (name, value) in extra {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::Configuration(format!("invalid header name `{name}`: {e}")))?;
            let header_value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::Configuration(format!("invalid header value for `{name}`: {e}")))?;
            header_map.insert(header_name, header_value);
        }
    }

    let body = match payload {
        Some(payload) => {
            Some(codec::encode(payload).map_err(|e| Error::PayloadSerialization(e.to_string()))?)
        }
        None => None,
    };

    Ok(RequestDescriptor {
        method,
        url,
        headers: header_map,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn sets_json_defaults_for_content_type_and_accept() {
        let descriptor =
            assemble::<Value>(Method::GET, "https://example.com/", None, None, None).unwrap();
        assert_eq!(
            descriptor.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(descriptor.headers.get(ACCEPT).unwrap(), "application/json");
        assert!(descriptor.body.is_none());
    }

    #[test]
    fn caller_headers_override_defaults_and_extend() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/vnd.api+json".to_string());
        headers.insert("x-trace-id".to_string(), "abc123".to_string());

        let descriptor =
            assemble::<Value>(Method::GET, "https://example.com/", None, None, Some(&headers))
                .unwrap();
        assert_eq!(
            descriptor.headers.get(CONTENT_TYPE).unwrap(),
            "application/vnd.api+json"
        );
        assert_eq!(descriptor.headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(descriptor.headers.get("x-trace-id").unwrap(), "abc123");
    }

    #[test]
    fn encodes_payload_into_body_bytes() {
        let payload = json!({"hi": "there"});
        let descriptor = assemble(
            Method::POST,
            "https://example.com/post",
            None,
            Some(&payload),
            None,
        )
        .unwrap();
        let body = descriptor.body.unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), payload);
    }

    #[test]
    fn unrepresentable_payload_fails_assembly() {
        let mut payload = BTreeMap::new();
        payload.insert((1u8, 2u8), "nope");
        let result = assemble(
            Method::POST,
            "https://example.com/post",
            None,
            Some(&payload),
            None,
        );
        assert!(matches!(result, Err(Error::PayloadSerialization(_))));
    }

    #[test]
    fn bad_base_url_propagates_as_invalid_url() {
        let result = assemble::<Value>(Method::GET, "::bad::", None, None, None);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn invalid_header_name_is_a_configuration_error() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "value".to_string());
        let result =
            assemble::<Value>(Method::GET, "https://example.com/", None, None, Some(&headers));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn merges_query_params_into_the_url() {
        let mut params = Map::new();
        params.insert("hello".to_string(), json!("world"));
        let descriptor = assemble::<Value>(
            Method::GET,
            "https://example.com/get",
            Some(&params),
            None,
            None,
        )
        .unwrap();
        assert_eq!(descriptor.url, "https://example.com/get?hello=world");
    }
}
