//! URL building and query-parameter merging.
//!
//! A final URL is produced from a base string (which may already carry a
//! query string) plus an optional map of additional parameters. Existing
//! query items are preserved and new ones appended after them, in the map's
//! iteration order; duplicate keys are kept as separate items, never
//! collapsed.

use crate::{Error, Result};
use serde_json::{Map, Value};
use url::form_urlencoded;
use url::Url;

/// Builds a final URL string from a base and optional query parameters.
///
/// The empty string is a valid base: it yields an empty result (or a bare
/// query string when parameters are supplied), which keeps URL construction
/// testable without a host. Any other base must parse as an absolute URL or
/// the build fails with [`Error::InvalidUrl`].
///
/// Query values are stringified with [`query_value`]. Percent-encoding is
/// whatever the `url` crate guarantees; simple alphanumeric pairs appear
/// literally as `key=value` in the result.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Map};
///
/// let mut params = Map::new();
/// params.insert("hello".into(), json!("world"));
///
/// let url = jaunt::urls::build("https://example.com/get", Some(&params)).unwrap();
/// assert_eq!(url, "https://example.com/get?hello=world");
/// ```
pub fn build(base: &str, params: Option<&Map<String, Value>>) -> Result<String> {
    let params = params.filter(|params| !params.is_empty());

    if base.is_empty() {
        let Some(params) = params else {
            return Ok(String::new());
        };
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            query.append_pair(key, &query_value(value));
        }
        return Ok(format!("?{}", query.finish()));
    }

    let mut url = Url::parse(base).map_err(Error::InvalidUrl)?;
    if let Some(params) = params {
        // append_pair keeps whatever query items the base already had.
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, &query_value(value));
        }
    }
    Ok(String::from(url))
}

/// Canonical textual form of a JSON value used as a query item.
///
/// One fixed form per scalar kind: `null` for null, `true`/`false` for
/// booleans, the natural decimal representation for numbers (integers carry
/// no decimal point), and strings verbatim. Arrays and objects fall back to
/// their compact JSON text.
pub fn query_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        nested => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn appends_every_pair_in_map_order() {
        let params = params(&[("alpha", json!(1)), ("beta", json!("two"))]);
        let url = build("https://example.com/path", Some(&params)).unwrap();
        assert_eq!(url, "https://example.com/path?alpha=1&beta=two");
    }

    #[test]
    fn preserves_existing_query_and_appends_after_it() {
        let params = params(&[("new", json!("yes"))]);
        let url = build("https://example.com/path?kept=1&kept=2", Some(&params)).unwrap();
        assert_eq!(url, "https://example.com/path?kept=1&kept=2&new=yes");
    }

    #[test]
    fn duplicate_keys_are_retained_not_overwritten() {
        let params = params(&[("a", json!("fresh"))]);
        let url = build("https://example.com/?a=stale", Some(&params)).unwrap();
        assert_eq!(url, "https://example.com/?a=stale&a=fresh");
        assert_eq!(url.matches("a=").count(), 2);
    }

    #[test]
    fn empty_base_without_params_is_empty_not_an_error() {
        assert_eq!(build("", None).unwrap(), "");
    }

    #[test]
    fn empty_base_with_params_is_a_bare_query_string() {
        let params = params(&[("hello", json!("world"))]);
        assert_eq!(build("", Some(&params)).unwrap(), "?hello=world");
    }

    #[test]
    fn unparseable_base_fails_with_invalid_url() {
        let result = build("not a url", None);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn empty_params_map_adds_no_query() {
        let params = Map::new();
        let url = build("https://example.com/path", Some(&params)).unwrap();
        assert_eq!(url, "https://example.com/path");
    }

    #[test]
    fn scalar_query_values_have_one_canonical_form() {
        assert_eq!(query_value(&json!(null)), "null");
        assert_eq!(query_value(&json!(true)), "true");
        assert_eq!(query_value(&json!(false)), "false");
        assert_eq!(query_value(&json!(42)), "42");
        assert_eq!(query_value(&json!(-7)), "-7");
        assert_eq!(query_value(&json!(2.5)), "2.5");
        assert_eq!(query_value(&json!("verbatim")), "verbatim");
    }

    #[test]
    fn nested_query_values_use_compact_json_text() {
        assert_eq!(query_value(&json!([1, 2])), "[1,2]");
        assert_eq!(query_value(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn simple_pairs_appear_literally() {
        let params = params(&[("hello", json!("world"))]);
        let url = build("https://example.com/get", Some(&params)).unwrap();
        assert!(url.contains("hello=world"));
    }
}
