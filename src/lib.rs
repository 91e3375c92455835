//! # Jaunt - a small JSON-over-HTTP convenience client
//!
//! Jaunt issues single HTTP requests carrying JSON payloads and hands back
//! either decoded JSON (`serde_json::Value`) or a typed failure. It builds
//! the final URL from a base string plus query parameters, attaches JSON
//! headers and body, executes the call asynchronously (or synchronously via
//! the blocking bridge), and classifies the raw outcome into one exhaustive
//! result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jaunt::Client;
//! use serde_json::{json, Map};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jaunt::Error> {
//!     let client = Client::builder()
//!         .user_agent("my-app/1.0")
//!         .build()?;
//!
//!     // GET with query parameters merged into the URL
//!     let mut params = Map::new();
//!     params.insert("hello".into(), json!("world"));
//!     let response = client
//!         .get("https://httpbin.org/get", Some(&params), None, None)
//!         .await?;
//!     println!("args: {}", response.data["args"]);
//!     println!("status: {}, took {:?}", response.status(), response.latency);
//!
//!     // POST with a JSON payload
//!     let payload = json!({"hi": "there"});
//!     let created = client
//!         .post("https://httpbin.org/post", None, Some(&payload), None)
//!         .await?;
//!     println!("echoed: {}", created.data["json"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! Synchronous call sites use the [`blocking`] module instead:
//!
//! ```no_run
//! # fn main() -> Result<(), jaunt::Error> {
//! let data = jaunt::blocking::get("https://httpbin.org/get", None, None, None)?;
//! println!("{data}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Query-parameter merging** - existing query items in the base URL are
//!   preserved, new ones appended; duplicate keys are kept, not collapsed
//! - **JSON by default** - `Content-Type` and `Accept` are set to
//!   `application/json` unless the caller overrides them
//! - **Exhaustive result taxonomy** - invalid URL, unserializable payload,
//!   unreachable network, transport failure, non-HTTP response, and
//!   undecodable body are distinct [`Error`] variants, each carrying the
//!   response metadata and raw body that were actually captured
//! - **Empty bodies are not errors** - a valid HTTP response with no body is
//!   a success with `Value::Null` data
//! - **Blocking bridge** - a synchronous client that parks on the async
//!   outcome with a real blocking wait, never a poll loop
//! - **Structured logging** - request and response events via `tracing`,
//!   purely observational
//!
//! ## One request, one outcome
//!
//! Each call builds its own request descriptor, submits exactly one
//! asynchronous transport operation, and completes with exactly one result.
//! Timeouts (connect and total) bound worst-case latency. There are no
//! retries anywhere in the pipeline; retry policy belongs to the caller.
//! Status-code policy does too: a 404 with a decodable JSON body is a
//! success whose [`Response::status`] reports 404.

pub mod blocking;
mod client;
pub mod codec;
mod config;
mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod urls;

pub use client::{delete, get, patch, post, put, Client, ClientBuilder};
pub use config::Config;
pub use error::{Error, Result, TransportError};
pub use request::RequestDescriptor;
pub use response::{classify, Response, ResponseMeta};
pub use transport::{AlwaysReachable, Exchange, Reachability};
