//! Asynchronous request execution over `reqwest`.
//!
//! The transport submits one descriptor and delivers exactly one terminal
//! [`Exchange`]: either a transport-level error, or a (possibly empty) byte
//! body with response metadata. Classification of that outcome lives in
//! [`crate::response`].

use crate::config::Config;
use crate::error::TransportError;
use crate::request::RequestDescriptor;
use crate::response::ResponseMeta;
use crate::{Error, Result};
use std::time::{Duration, Instant};
use url::Url;

/// An external probe for general network availability.
///
/// Checked synchronously before every submission; when it reports
/// unreachable, the call short-circuits with
/// [`Error::NoInternetConnection`](crate::Error::NoInternetConnection) and
/// the network is never touched. The probe is about the general internet
/// route, not the specific target host.
pub trait Reachability: Send + Sync {
    /// Returns `true` if the general internet route is available right now.
    fn is_reachable(&self) -> bool;
}

/// The default probe: always reports the network as reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReachable;

impl Reachability for AlwaysReachable {
    fn is_reachable(&self) -> bool {
        true
    }
}

/// The raw outcome of one transport exchange, before classification.
///
/// At most one of `error` / a complete response is meaningful; the
/// classifier resolves any overlap with a fixed precedence. Constructible by
/// hand so classification can be tested without a network.
#[derive(Debug)]
pub struct Exchange {
    /// Response body bytes, if any were received.
    pub body: Option<Vec<u8>>,

    /// Response metadata, if an HTTP response was received.
    pub response: Option<ResponseMeta>,

    /// The transport-level error, if the exchange failed below HTTP.
    pub error: Option<TransportError>,

    /// Wall-clock time from submission to terminal outcome.
    pub latency: Duration,
}

/// Executes assembled requests over a configured `reqwest` client.
///
/// The client is built once from a [`Config`] snapshot; timeouts and the
/// optional user-agent are session-level settings, not per-request headers.
pub(crate) struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Submits one descriptor and returns its terminal outcome.
    ///
    /// Never returns more than one outcome per call, and never panics on
    /// transport failure; errors are carried in the [`Exchange`].
    pub(crate) async fn execute(&self, descriptor: &RequestDescriptor, target: Url) -> Exchange {
        let start = Instant::now();

        tracing::debug!(
            method = %descriptor.method,
            url = %target,
            body_bytes = descriptor.body.as_ref().map_or(0, Vec::len),
            "sending HTTP request"
        );

        let mut request = self
            .http
            .request(descriptor.method.clone(), target)
            .headers(descriptor.headers.clone());
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }

        match request.send().await {
            Ok(response) => {
                let meta = ResponseMeta {
                    status: response.status(),
                    headers: response.headers().clone(),
                };
                match response.bytes().await {
                    Ok(bytes) => {
                        let latency = start.elapsed();
                        tracing::info!(
                            status = meta.status.as_u16(),
                            latency_ms = latency.as_millis() as u64,
                            body_bytes = bytes.len(),
                            "received HTTP response"
                        );
                        Exchange {
                            body: Some(bytes.to_vec()),
                            response: Some(meta),
                            error: None,
                            latency,
                        }
                    }
                    Err(e) => {
                        let latency = start.elapsed();
                        tracing::warn!(
                            status = meta.status.as_u16(),
                            error = %e,
                            latency_ms = latency.as_millis() as u64,
                            "failed to read response body"
                        );
                        Exchange {
                            body: None,
                            response: Some(meta),
                            error: Some(e.into()),
                            latency,
                        }
                    }
                }
            }
            Err(e) => {
                let latency = start.elapsed();
                tracing::warn!(
                    error = %e,
                    latency_ms = latency.as_millis() as u64,
                    "transport error"
                );
                Exchange {
                    body: None,
                    response: None,
                    error: Some(e.into()),
                    latency,
                }
            }
        }
    }
}
