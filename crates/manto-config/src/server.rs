use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

/// HTTP server configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind (defaults to `0.0.0.0:8080`)
    pub listen_address: Option<SocketAddr>,
    /// Outer deadline for a whole request, upstream call included
    ///
    /// Humanized duration string, e.g. `"60s"` or `"2m"`.
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            request_timeout: default_request_timeout(),
        }
    }
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}
