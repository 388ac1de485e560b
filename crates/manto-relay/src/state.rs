//! Shared state for relay route handlers

use std::sync::Arc;

use manto_config::Config;

use crate::client::AnthropicClient;
use crate::error::RelayError;
use crate::validate::ValidationLimits;

/// Client-facing relay version, reported in the config descriptor
const RELAY_VERSION: &str = "2.0.0";

/// State shared by all relay handlers
#[derive(Clone)]
pub struct RelayState {
    pub(crate) inner: Arc<RelayStateInner>,
}

pub(crate) struct RelayStateInner {
    pub(crate) client: AnthropicClient,
    pub(crate) limits: ValidationLimits,
    pub(crate) config_script: String,
}

impl RelayState {
    /// Build relay state from configuration
    ///
    /// The config descriptor script is rendered once here so repeated
    /// `/config.js` requests return byte-identical payloads.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        Ok(Self {
            inner: Arc::new(RelayStateInner {
                client: AnthropicClient::new(&config.anthropic)?,
                limits: ValidationLimits::from_config(config),
                config_script: build_config_script(config),
            }),
        })
    }
}

/// Render the client-usable configuration as a JS assignment
///
/// Only non-secret values the browser needs: provider identity, key
/// prefix, validation limits. Never keys, never listen topology, never
/// the HSTS toggle.
fn build_config_script(config: &Config) -> String {
    let descriptor = serde_json::json!({
        "providers": [
            { "name": "anthropic", "displayName": "Anthropic" }
        ],
        "api": {
            "anthropicKeyPrefix": config.anthropic.key_prefix,
        },
        "validation": {
            "maxMessageLength": config.validation.max_message_length,
            "minApiKeyLength": config.security.api_key_min_length,
        },
        "version": RELAY_VERSION,
    });

    format!("window.MantoConfig = {descriptor};")
}
