use http::StatusCode;
use manto_core::HttpError;
use thiserror::Error;

/// Errors produced by the relay
///
/// Validation variants carry the exact client-facing wording; they are
/// what the `{"error": ...}` body serializes from.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No `x-api-key` header, or an empty one
    #[error("API key required")]
    ApiKeyMissing,

    /// Key fails the length-or-prefix check
    #[error("Invalid API key format")]
    ApiKeyFormat,

    /// Body does not parse as a message request
    #[error("Invalid JSON format")]
    MalformedBody,

    #[error("Model is required")]
    ModelRequired,

    #[error("Messages are required")]
    MessagesRequired,

    #[error("Message too long (max {max} characters)")]
    MessageTooLong { max: usize },

    #[error("MaxTokens must be greater than 0")]
    MaxTokensZero,

    /// Provider rejected the call; message is either the provider's own
    /// error text or one drawn from the fixed status vocabulary
    #[error("{message}")]
    Upstream {
        message: String,
        /// Raw upstream error body, preserved for diagnostics
        details: Option<String>,
    },

    /// Transport failure reaching the provider (DNS, connect, timeout)
    #[error("{0}")]
    Network(String),

    /// Anything not classified above; never exposed to the client
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }

    fn client_details(&self) -> Option<String> {
        match self {
            Self::Upstream { details, .. } => details.clone(),
            _ => None,
        }
    }
}
