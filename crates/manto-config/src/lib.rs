#![allow(clippy::must_use_candidate)]

pub mod anthropic;
mod env;
mod loader;
pub mod security;
pub mod server;
pub mod validation;

use serde::Deserialize;

pub use anthropic::AnthropicConfig;
pub use security::SecurityConfig;
pub use server::ServerConfig;
pub use validation::ValidationConfig;

/// Top-level Manto configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Security policy (HSTS, CSP endpoints, key format)
    #[serde(default)]
    pub security: SecurityConfig,
    /// Upstream Anthropic API configuration
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    /// Inbound request validation limits
    #[serde(default)]
    pub validation: ValidationConfig,
}
