//! Error types for the request pipeline.
//!
//! Every failure the pipeline can produce is a variant of [`Error`], and each
//! variant carries whatever was actually captured before things went wrong:
//! response metadata when an HTTP response was received, the raw body text
//! when bytes arrived but could not be decoded. Exactly one variant describes
//! any given failure, and `match`ing on the enum is exhaustive by
//! construction.

use crate::response::ResponseMeta;

/// A transport-level failure (DNS, connect, TLS, timeout).
///
/// Wraps the underlying `reqwest::Error` when one exists so callers can
/// inspect the original cause through the `source` chain. Tests that exercise
/// classification directly can build one from a plain message with
/// [`TransportError::new`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportError {
    /// Creates a transport error from a message, with no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Returns `true` if the underlying error was a timeout.
    pub fn is_timeout(&self) -> bool {
        self.source.as_ref().is_some_and(reqwest::Error::is_timeout)
    }

    /// Returns `true` if the underlying error happened while connecting.
    pub fn is_connect(&self) -> bool {
        self.source.as_ref().is_some_and(reqwest::Error::is_connect)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// The main error type for the request pipeline.
///
/// # Examples
///
/// ```no_run
/// use jaunt::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
///
/// match client.get("https://api.example.com/users", None, None, None).await {
///     Ok(response) => println!("data: {}", response.data),
///     Err(Error::ResponseDeserialization { raw_body, serde_error, .. }) => {
///         eprintln!("body was not JSON: {serde_error}");
///         eprintln!("raw body: {raw_body}");
///     }
///     Err(Error::RequestFailed { source, .. }) => {
///         eprintln!("transport failure: {source}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The URL string could not be parsed, either while merging query
    /// parameters into the base string or when the assembled descriptor was
    /// submitted.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request payload is not representable as JSON.
    ///
    /// Detected by validating the payload (lifting it into a
    /// `serde_json::Value`) before any bytes are produced.
    #[error("payload is not representable as JSON: {0}")]
    PayloadSerialization(String),

    /// The reachability probe reported no route to the internet.
    ///
    /// Raised before the request is ever submitted; the network is never
    /// touched.
    #[error("no internet connection")]
    NoInternetConnection,

    /// The transport reported a failure (DNS, connect, TLS, timeout).
    ///
    /// Takes precedence over anything else captured during the exchange. The
    /// response metadata and raw body are present only if they were received
    /// before the failure.
    #[error("request failed: {source}")]
    RequestFailed {
        /// The transport-level cause, with the original error preserved.
        #[source]
        source: TransportError,
        /// Response metadata, if a response was received before the failure.
        response: Option<ResponseMeta>,
        /// Raw body text, if any bytes were received.
        raw_body: Option<String>,
    },

    /// No well-formed HTTP response was obtained, and no transport error was
    /// reported either.
    #[error("response was not a well-formed HTTP response")]
    NonHttpResponse,

    /// An HTTP response arrived with a non-empty body that is not valid JSON.
    ///
    /// The raw body text is preserved for inspection.
    #[error("failed to decode response body (status {}): {serde_error}", .response.status)]
    ResponseDeserialization {
        /// The serde error message.
        serde_error: String,
        /// Metadata of the response whose body failed to decode.
        response: ResponseMeta,
        /// The raw body text that failed to decode.
        raw_body: String,
    },

    /// Invalid configuration: a bad header name or value, or a client or
    /// runtime that could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the response metadata captured with this error, if any.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Error::RequestFailed { response, .. } => response.as_ref(),
            Error::ResponseDeserialization { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status code if a response was captured.
    pub fn status(&self) -> Option<http::StatusCode> {
        self.response().map(|meta| meta.status)
    }

    /// Returns the raw response body text if bytes were captured.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Error::RequestFailed { raw_body, .. } => raw_body.as_deref(),
            Error::ResponseDeserialization { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }
}

/// A specialized `Result` type for the request pipeline.
pub type Result<T> = std::result::Result<T, Error>;
