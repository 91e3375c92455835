//! Blocking bridge over the asynchronous pipeline.
//!
//! For call sites that need a synchronous request/response contract, a
//! [`Client`] owns a current-thread tokio runtime and parks the calling
//! thread on [`Runtime::block_on`] until the single async outcome arrives.
//! That is a real blocking wait, not a poll loop; the runtime it drives is
//! the one delivering the outcome, so it cannot deadlock itself.
//!
//! Must not be used from inside an async runtime — use the async
//! [`crate::Client`] there instead.
//!
//! # Examples
//!
//! ```no_run
//! use serde_json::{json, Map};
//!
//! # fn example() -> jaunt::Result<()> {
//! let mut params = Map::new();
//! params.insert("hello".into(), json!("world"));
//!
//! let data = jaunt::blocking::get("https://httpbin.org/get", Some(&params), None, None)?;
//! assert_eq!(data["args"]["hello"], "world");
//! # Ok(())
//! # }
//! ```

use crate::request::RequestDescriptor;
use crate::response::ResponseMeta;
use crate::{Error, Result};
use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::runtime::Runtime;

/// A blocking JSON-over-HTTP client.
///
/// Wraps an async [`crate::Client`] together with the runtime that drives
/// it. Verb methods return the decoded JSON data directly; response metadata
/// stays available through [`last_response`](Self::last_response).
pub struct Client {
    inner: crate::Client,
    runtime: Runtime,
}

impl Client {
    /// Creates a blocking client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::from_client(crate::Client::new()?)
    }

    /// Wraps an existing async client in a blocking bridge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the runtime cannot be started.
    pub fn from_client(inner: crate::Client) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Configuration(format!("failed to start blocking runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    /// Runs one request and blocks until its outcome arrives.
    ///
    /// On success the decoded JSON data is returned ([`Value::Null`] for an
    /// empty body); on failure the error carries whatever response metadata
    /// and raw body were captured.
    pub fn call<P: Serialize>(
        &self,
        method: Method,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&P>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.runtime
            .block_on(self.inner.call(method, url, params, payload, headers))
            .map(|response| response.data)
    }

    /// Makes a blocking GET request.
    pub fn get(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.call(Method::GET, url, params, payload, headers)
    }

    /// Makes a blocking POST request.
    pub fn post(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.call(Method::POST, url, params, payload, headers)
    }

    /// Makes a blocking PUT request.
    pub fn put(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.call(Method::PUT, url, params, payload, headers)
    }

    /// Makes a blocking PATCH request.
    pub fn patch(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.call(Method::PATCH, url, params, payload, headers)
    }

    /// Makes a blocking DELETE request.
    pub fn delete(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        self.call(Method::DELETE, url, params, payload, headers)
    }

    /// The descriptor of the most recently issued request, if any.
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.inner.last_request()
    }

    /// The metadata of the most recently received response, if any.
    pub fn last_response(&self) -> Option<ResponseMeta> {
        self.inner.last_response()
    }
}

/// Makes a blocking GET request with a transient default client.
pub fn get(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Value> {
    Client::new()?.get(url, params, payload, headers)
}

/// Makes a blocking POST request with a transient default client.
pub fn post(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Value> {
    Client::new()?.post(url, params, payload, headers)
}

/// Makes a blocking PUT request with a transient default client.
pub fn put(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Value> {
    Client::new()?.put(url, params, payload, headers)
}

/// Makes a blocking PATCH request with a transient default client.
pub fn patch(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Value> {
    Client::new()?.patch(url, params, payload, headers)
}

/// Makes a blocking DELETE request with a transient default client.
pub fn delete(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Value> {
    Client::new()?.delete(url, params, payload, headers)
}
