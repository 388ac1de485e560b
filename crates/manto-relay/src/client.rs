//! HTTP client for the upstream Anthropic API
//!
//! Performs exactly one outbound call per inbound relay request. There
//! is no retry logic: a failed call surfaces immediately to the caller.

use http::StatusCode;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use manto_config::AnthropicConfig;

use crate::error::RelayError;
use crate::types::{MessageRequest, MessageResponse, UpstreamErrorEnvelope};

/// User-Agent sent on every upstream call
const USER_AGENT: &str = "Manto/2.0";

/// Client for the Anthropic Messages API
///
/// Holds the server-side generation parameters that replace whatever
/// the browser client sent.
pub struct AnthropicClient {
    client: Client,
    base_url: Url,
    api_version: String,
    max_tokens: u32,
    temperature: f64,
    system_message: String,
}

impl AnthropicClient {
    /// Create from upstream configuration
    ///
    /// The reqwest client pools connections and bounds every call with
    /// the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Internal` if the client cannot be built
    pub fn new(config: &AnthropicConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system_message: config.system_message.clone(),
        })
    }

    /// Fetch the provider's model listing
    ///
    /// Returns the raw JSON payload unmodified on 2xx.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Upstream` on non-2xx
    pub async fn list_models(&self, api_key: &SecretString) -> Result<String, RelayError> {
        let response = self
            .client
            .get(self.endpoint("/v1/models"))
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", &self.api_version)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::warn!(%status, "upstream model listing failed");
            return Err(upstream_error(
                status,
                body,
                &format!("API error (status {})", status.as_u16()),
            ));
        }

        Ok(body)
    }

    /// Send a message request upstream and deserialize the response
    ///
    /// `max_tokens`, `temperature`, and `system` are replaced with the
    /// configured server-side values before sending. The client's own
    /// values are validate-only; the server owns generation parameters.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Upstream` on non-2xx or an
    /// unparseable success body
    pub async fn send_message(
        &self,
        api_key: &SecretString,
        mut request: MessageRequest,
    ) -> Result<MessageResponse, RelayError> {
        request.max_tokens = i64::from(self.max_tokens);
        request.temperature = Some(self.temperature);
        request.system = Some(self.system_message.clone());

        let response = self
            .client
            .post(self.endpoint("/v1/messages"))
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::warn!(%status, "upstream message send failed");
            return Err(upstream_error(status, body, "failed to send message"));
        }

        serde_json::from_str(&body).map_err(|e| RelayError::Upstream {
            message: format!("failed to parse response: {e}"),
            details: None,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }
}

/// Classify a reqwest failure as timeout or generic network error
fn map_transport_error(error: reqwest::Error) -> RelayError {
    if error.is_timeout() {
        RelayError::Network("request timed out".to_owned())
    } else {
        tracing::error!(error = %error, "upstream request failed");
        RelayError::Network("network error".to_owned())
    }
}

/// Map a non-2xx upstream response to a relay error
///
/// A structured provider error object wins over the fixed status
/// vocabulary; the raw body is preserved in `details` either way.
/// `fallback` covers statuses outside the vocabulary and names the
/// operation that failed.
fn upstream_error(status: StatusCode, body: String, fallback: &str) -> RelayError {
    if let Ok(envelope) = serde_json::from_str::<UpstreamErrorEnvelope>(&body)
        && !envelope.error.message.is_empty()
    {
        return RelayError::Upstream {
            message: envelope.error.message,
            details: Some(body),
        };
    }

    let message = match status {
        StatusCode::UNAUTHORIZED => "invalid API key",
        StatusCode::BAD_REQUEST => "invalid request format",
        StatusCode::TOO_MANY_REQUESTS => "rate limit exceeded",
        StatusCode::INTERNAL_SERVER_ERROR => "service temporarily unavailable",
        _ => fallback,
    };

    RelayError::Upstream {
        message: message.to_owned(),
        details: (!body.is_empty()).then_some(body),
    }
}
