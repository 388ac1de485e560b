//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use manto_config::Config;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at a mock upstream
    ///
    /// Binds to port 0 and shortens the upstream timeout so failing
    /// tests do not hang.
    pub fn new(upstream_base_url: &str) -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        config.anthropic.base_url = upstream_base_url.parse().expect("valid mock URL");
        config.anthropic.timeout = std::time::Duration::from_secs(5);
        Self { config }
    }

    /// Shorten the upstream call timeout
    pub fn with_upstream_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.anthropic.timeout = timeout;
        self
    }

    /// Toggle HSTS emission
    pub fn with_hsts(mut self, enabled: bool) -> Self {
        self.config.security.enable_hsts = enabled;
        self
    }

    /// Override the accepted key prefix
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.config.anthropic.key_prefix = prefix.to_owned();
        self
    }

    /// Override the maximum message length
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.config.validation.max_message_length = max;
        self
    }

    /// Override the server-enforced generation budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.anthropic.max_tokens = max_tokens;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
