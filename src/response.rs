//! Response metadata, the success wrapper, and exchange classification.
//!
//! [`classify`] turns a raw [`Exchange`] into the crate's single result
//! shape: a [`Response`] with decoded JSON, or an [`Error`] variant carrying
//! whatever was captured.

use crate::codec;
use crate::transport::Exchange;
use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Metadata of a received HTTP response: status code and headers.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,
}

impl ResponseMeta {
    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

/// A successful request outcome.
///
/// Always carries response metadata; `data` is [`Value::Null`] when the body
/// was empty, which is a valid outcome and not an error.
#[derive(Debug, Clone)]
pub struct Response {
    /// The decoded response body. `Value::Null` for an empty body.
    pub data: Value,

    /// The raw response body text, kept for debugging and logging.
    pub raw_body: String,

    /// Status code and headers of the response.
    pub meta: ResponseMeta,

    /// Wall-clock time the exchange took.
    pub latency: Duration,
}

impl Response {
    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.meta.status
    }

    /// Returns a response header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.meta.header(name)
    }
}

/// Classifies a raw exchange into the final result.
///
/// The decision order is fixed and each step is a hard edge case:
///
/// 1. A transport error wins over everything else captured, yielding
///    [`Error::RequestFailed`] with whatever metadata and body text exist.
/// 2. Without a transport error, a missing HTTP response yields
///    [`Error::NonHttpResponse`], even if bytes are present.
/// 3. An absent or zero-length body on a real response is a success with
///    [`Value::Null`] data.
/// 4. Otherwise the body is JSON-decoded; failure yields
///    [`Error::ResponseDeserialization`] with the raw text retained.
///
/// Non-2xx statuses are not failures here; status policy belongs to the
/// caller.
pub fn classify(exchange: Exchange) -> Result<Response> {
    let Exchange {
        body,
        response,
        error,
        latency,
    } = exchange;

    if let Some(source) = error {
        return Err(Error::RequestFailed {
            source,
            response,
            raw_body: body.map(into_text),
        });
    }

    let Some(meta) = response else {
        return Err(Error::NonHttpResponse);
    };

    let bytes = match body {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            return Ok(Response {
                data: Value::Null,
                raw_body: String::new(),
                meta,
                latency,
            })
        }
    };

    match codec::decode(&bytes) {
        Ok(data) => Ok(Response {
            raw_body: into_text(bytes),
            data,
            meta,
            latency,
        }),
        Err(e) => Err(Error::ResponseDeserialization {
            serde_error: e.to_string(),
            response: meta,
            raw_body: into_text(bytes),
        }),
    }
}

fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use serde_json::json;

    fn meta(status: u16) -> ResponseMeta {
        ResponseMeta {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
        }
    }

    fn exchange(
        body: Option<&[u8]>,
        response: Option<ResponseMeta>,
        error: Option<TransportError>,
    ) -> Exchange {
        Exchange {
            body: body.map(<[u8]>::to_vec),
            response,
            error,
            latency: Duration::ZERO,
        }
    }

    #[test]
    fn transport_error_wins_even_with_response_and_body() {
        let result = classify(exchange(
            Some(b"partial"),
            Some(meta(200)),
            Some(TransportError::new("connection reset")),
        ));
        match result {
            Err(Error::RequestFailed {
                response, raw_body, ..
            }) => {
                assert_eq!(response.unwrap().status.as_u16(), 200);
                assert_eq!(raw_body.as_deref(), Some("partial"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn transport_error_without_response_carries_nothing_extra() {
        let result = classify(exchange(None, None, Some(TransportError::new("dns failure"))));
        match result {
            Err(Error::RequestFailed {
                response, raw_body, ..
            }) => {
                assert!(response.is_none());
                assert!(raw_body.is_none());
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_response_is_non_http_even_with_bytes() {
        let result = classify(exchange(Some(b"{\"x\":1}"), None, None));
        assert!(matches!(result, Err(Error::NonHttpResponse)));
    }

    #[test]
    fn absent_body_is_a_null_success() {
        let response = classify(exchange(None, Some(meta(204)), None)).unwrap();
        assert_eq!(response.data, Value::Null);
        assert_eq!(response.status().as_u16(), 204);
    }

    #[test]
    fn zero_length_body_is_a_null_success() {
        let response = classify(exchange(Some(b""), Some(meta(200)), None)).unwrap();
        assert_eq!(response.data, Value::Null);
        assert_eq!(response.raw_body, "");
    }

    #[test]
    fn valid_json_body_decodes_to_equal_value() {
        let body = serde_json::to_vec(&json!({"args": {"hello": "world"}})).unwrap();
        let response = classify(exchange(Some(&body), Some(meta(200)), None)).unwrap();
        assert_eq!(response.data, json!({"args": {"hello": "world"}}));
        assert_eq!(response.status().as_u16(), 200);
    }

    #[test]
    fn scalar_body_is_a_valid_success() {
        let response = classify(exchange(Some(b"42"), Some(meta(200)), None)).unwrap();
        assert_eq!(response.data, json!(42));
    }

    #[test]
    fn undecodable_body_keeps_raw_text_and_metadata() {
        let result = classify(exchange(Some(b"<html>oops</html>"), Some(meta(502)), None));
        match result {
            Err(Error::ResponseDeserialization {
                response, raw_body, ..
            }) => {
                assert_eq!(response.status.as_u16(), 502);
                assert_eq!(raw_body, "<html>oops</html>");
            }
            other => panic!("expected ResponseDeserialization, got {other:?}"),
        }
    }

    #[test]
    fn non_2xx_status_with_valid_json_is_still_a_success() {
        let body = serde_json::to_vec(&json!({"error": "not found"})).unwrap();
        let response = classify(exchange(Some(&body), Some(meta(404)), None)).unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(response.data["error"], "not found");
    }
}
