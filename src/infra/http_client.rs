//! HTTP client factory with consistent timeout configuration.
//!
//! Outbound clients (the analyzer adapter) are built here so every external
//! call is bounded by a connect timeout and a total request timeout.

use reqwest::Client;
use std::time::Duration;

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default request timeout (total request/response time).
///
/// Model calls routinely take several seconds; the analysis gateway applies
/// its own, usually tighter, bound on top of this.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build an HTTP client with default timeouts.
pub fn try_build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .user_agent(concat!("phishnet/", env!("CARGO_PKG_VERSION")))
        .build()
}
