//! Client configuration.

use std::time::Duration;

/// Configuration for a [`Client`](crate::Client).
///
/// A `Config` is consumed when the client is built, so the underlying HTTP
/// client is a snapshot of it: changing a `Config` after building has no
/// effect on that client or on requests already in flight. Build a new client
/// to pick up new settings. Tests can construct independent configurations in
/// parallel without interfering with each other.
///
/// # Examples
///
/// ```no_run
/// use jaunt::{Client, Config};
/// use std::time::Duration;
///
/// # fn example() -> jaunt::Result<()> {
/// let config = Config {
///     connect_timeout: Duration::from_secs(5),
///     timeout: Duration::from_secs(20),
///     user_agent: Some("my-app/1.0".to_string()),
/// };
/// let client = Client::builder().config(config).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum time allowed for establishing a connection.
    pub connect_timeout: Duration,

    /// Maximum time allowed for the whole request, connect included.
    ///
    /// Once exceeded, the transport reports a timeout-class failure, so no
    /// request blocks its caller indefinitely.
    pub timeout: Duration,

    /// Optional `User-Agent` applied as a default header on the underlying
    /// HTTP client (not on individual request descriptors).
    pub user_agent: Option<String>,
}

impl Default for Config {
    /// Connect within 10 seconds, finish within 30, no user-agent override.
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}
