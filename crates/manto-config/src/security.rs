use serde::Deserialize;
use url::Url;

/// Security policy configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Emit `Strict-Transport-Security` on every response
    #[serde(default = "default_enable_hsts")]
    pub enable_hsts: bool,
    /// Upstream origins allowed in the `connect-src` CSP directive
    #[serde(default = "default_allowed_api_endpoints")]
    pub allowed_api_endpoints: Vec<Url>,
    /// Minimum accepted API key length
    #[serde(default = "default_api_key_min_length")]
    pub api_key_min_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_hsts: default_enable_hsts(),
            allowed_api_endpoints: default_allowed_api_endpoints(),
            api_key_min_length: default_api_key_min_length(),
        }
    }
}

const fn default_enable_hsts() -> bool {
    true
}

fn default_allowed_api_endpoints() -> Vec<Url> {
    vec![Url::parse("https://api.anthropic.com").expect("valid default URL")]
}

const fn default_api_key_min_length() -> usize {
    10
}
