//! The asynchronous client and its builder.
//!
//! [`Client`] drives the whole pipeline for one call: assemble a descriptor,
//! check reachability, execute over the transport, classify the outcome. Each
//! call builds its own descriptor and completes with exactly one result;
//! independent calls share nothing but the configuration snapshot taken when
//! the client was built.

use crate::config::Config;
use crate::request::{self, RequestDescriptor};
use crate::response::{classify, Response, ResponseMeta};
use crate::transport::{AlwaysReachable, Reachability, Transport};
use crate::{Error, Result};
use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

/// An asynchronous JSON-over-HTTP client.
///
/// Cheap to clone; clones share the underlying HTTP client and the retained
/// last request/response. The client takes absolute URLs per call rather than
/// a base URL, because merging a base string with query parameters is the
/// library's job.
///
/// # Examples
///
/// ```no_run
/// use jaunt::Client;
/// use serde_json::{json, Map};
///
/// # async fn example() -> jaunt::Result<()> {
/// let client = Client::new()?;
///
/// let mut params = Map::new();
/// params.insert("hello".into(), json!("world"));
///
/// let response = client
///     .get("https://httpbin.org/get", Some(&params), None, None)
///     .await?;
/// println!("args: {}", response.data["args"]);
/// println!("status: {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Transport,
    reachability: Arc<dyn Reachability>,
    last_request: Mutex<Option<RequestDescriptor>>,
    last_response: Mutex<Option<ResponseMeta>>,
}

impl Client {
    /// Creates a client with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a new [`ClientBuilder`] for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Runs the full pipeline for one request.
    ///
    /// Assembles a descriptor from the arguments, short-circuits with
    /// [`Error::NoInternetConnection`] if the reachability probe reports
    /// unreachable, executes the request, and classifies the raw outcome.
    /// The descriptor and any received response metadata are retained for
    /// [`last_request`](Self::last_request) /
    /// [`last_response`](Self::last_response).
    pub async fn call<P: Serialize>(
        &self,
        method: Method,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&P>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        let descriptor = request::assemble(method, url, params, payload, headers)?;
        *lock(&self.inner.last_request) = Some(descriptor.clone());

        // Probed synchronously, before anything is submitted.
        if !self.inner.reachability.is_reachable() {
            tracing::warn!(url = %descriptor.url, "network unreachable, request not submitted");
            return Err(Error::NoInternetConnection);
        }

        let target = Url::parse(&descriptor.url)?;
        let exchange = self.inner.transport.execute(&descriptor, target).await;
        if let Some(meta) = &exchange.response {
            *lock(&self.inner.last_response) = Some(meta.clone());
        }

        classify(exchange)
    }

    /// Makes a GET request.
    pub async fn get(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        self.call(Method::GET, url, params, payload, headers).await
    }

    /// Makes a POST request.
    pub async fn post(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        self.call(Method::POST, url, params, payload, headers).await
    }

    /// Makes a PUT request.
    pub async fn put(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        self.call(Method::PUT, url, params, payload, headers).await
    }

    /// Makes a PATCH request.
    pub async fn patch(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        self.call(Method::PATCH, url, params, payload, headers).await
    }

    /// Makes a DELETE request.
    pub async fn delete(
        &self,
        url: &str,
        params: Option<&Map<String, Value>>,
        payload: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        self.call(Method::DELETE, url, params, payload, headers)
            .await
    }

    /// The descriptor of the most recently issued request, if any.
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        lock(&self.inner.last_request).clone()
    }

    /// The metadata of the most recently received response, if any.
    ///
    /// Populated whenever an HTTP response was received, including for calls
    /// that ultimately failed classification.
    pub fn last_response(&self) -> Option<ResponseMeta> {
        lock(&self.inner.last_response).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use jaunt::Client;
/// use std::time::Duration;
///
/// # fn example() -> jaunt::Result<()> {
/// let client = Client::builder()
///     .connect_timeout(Duration::from_secs(5))
///     .timeout(Duration::from_secs(20))
///     .user_agent("my-app/1.0")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: Config,
    reachability: Arc<dyn Reachability>,
}

impl ClientBuilder {
    /// Creates a builder with the default configuration and an
    /// always-reachable probe.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            reachability: Arc::new(AlwaysReachable),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the connect-phase timeout.
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Sets the total request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` applied as a session default.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Replaces the reachability probe.
    pub fn reachability(mut self, probe: Arc<dyn Reachability>) -> Self {
        self.reachability = probe;
        self
    }

    /// Builds the configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<Client> {
        let transport = Transport::new(&self.config)?;
        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                reachability: self.reachability,
                last_request: Mutex::new(None),
                last_response: Mutex::new(None),
            }),
        })
    }

    /// Builds a [`blocking::Client`](crate::blocking::Client) with this
    /// configuration.
    pub fn build_blocking(self) -> Result<crate::blocking::Client> {
        crate::blocking::Client::from_client(self.build()?)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Makes a GET request with a transient default client.
pub async fn get(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Response> {
    Client::new()?.get(url, params, payload, headers).await
}

/// Makes a POST request with a transient default client.
pub async fn post(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Response> {
    Client::new()?.post(url, params, payload, headers).await
}

/// Makes a PUT request with a transient default client.
pub async fn put(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Response> {
    Client::new()?.put(url, params, payload, headers).await
}

/// Makes a PATCH request with a transient default client.
pub async fn patch(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Response> {
    Client::new()?.patch(url, params, payload, headers).await
}

/// Makes a DELETE request with a transient default client.
pub async fn delete(
    url: &str,
    params: Option<&Map<String, Value>>,
    payload: Option<&Value>,
    headers: Option<&HashMap<String, String>>,
) -> Result<Response> {
    Client::new()?.delete(url, params, payload, headers).await
}
