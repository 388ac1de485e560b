use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Upstream Anthropic API configuration
///
/// No API key lives here: the relay forwards the per-request key from
/// the `x-api-key` header and never stores one server-side.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Base URL of the Messages API
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Value for the `anthropic-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Timeout for a single upstream call
    #[serde(
        default = "default_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    pub timeout: Duration,
    /// Expected prefix of client-supplied API keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Model advertised to the browser client
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Server-enforced generation budget (overrides the client's value)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Server-enforced sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Server-enforced system prompt
    #[serde(default = "default_system_message")]
    pub system_message: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout: default_timeout(),
            key_prefix: default_key_prefix(),
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_message: default_system_message(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("https://api.anthropic.com").expect("valid default URL")
}

fn default_api_version() -> String {
    "2023-06-01".to_owned()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_key_prefix() -> String {
    "sk-ant-".to_owned()
}

fn default_model() -> String {
    "claude-3-5-haiku".to_owned()
}

const fn default_max_tokens() -> u32 {
    1024
}

const fn default_temperature() -> f64 {
    0.7
}

fn default_system_message() -> String {
    "Be concise in your responses unless asked otherwise. Prefer tables and short paragraphs.".to_owned()
}
