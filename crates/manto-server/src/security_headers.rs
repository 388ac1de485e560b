//! Security response headers
//!
//! Pure response decoration: a fixed header set attached to every
//! response, success or error. It performs no validation and can never
//! reject a request.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::header::{self, HeaderName, HeaderValue};
use manto_config::SecurityConfig;

/// Header set computed once at startup
pub struct SecurityHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    /// Build the header set, including the CSP derived from the
    /// configured upstream endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if a configured endpoint produces an invalid
    /// header value
    pub fn from_config(config: &SecurityConfig) -> anyhow::Result<Self> {
        let mut headers = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static("geolocation=()"),
            ),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (
                HeaderName::from_static("cross-origin-opener-policy"),
                HeaderValue::from_static("same-origin"),
            ),
            (
                HeaderName::from_static("cross-origin-resource-policy"),
                HeaderValue::from_static("same-site"),
            ),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_str(&build_csp(config))
                    .map_err(|e| anyhow::anyhow!("invalid CSP header value: {e}"))?,
            ),
        ];

        // The one conditional header, toggled per deployment
        if config.enable_hsts {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static("max-age=31536000; includeSubDomains; preload"),
            ));
        }

        Ok(Self { headers })
    }
}

/// Attach the precomputed header set to the outgoing response
pub async fn security_headers_middleware(policy: Arc<SecurityHeaders>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for (name, value) in &policy.headers {
        headers.insert(name.clone(), value.clone());
    }

    response
}

/// Build the Content-Security-Policy value from the allowed endpoints
fn build_csp(config: &SecurityConfig) -> String {
    let mut connect_sources = vec!["'self'"];
    connect_sources.extend(
        config
            .allowed_api_endpoints
            .iter()
            .map(|url| url.as_str().trim_end_matches('/')),
    );
    let connect = connect_sources.join(" ");

    format!(
        "default-src 'self'; connect-src {connect}; style-src 'self' 'unsafe-inline'; \
         script-src 'self'; img-src 'self' data:; object-src 'none'; base-uri 'self'"
    )
}
