//! Pure request validation, no I/O
//!
//! Checks run in a fixed order so rejection messages are deterministic:
//! key presence, key format, then (for message sends) model, messages,
//! message length, max_tokens.

use manto_config::Config;
use secrecy::{ExposeSecret, SecretString};

use crate::error::RelayError;
use crate::types::MessageRequest;

/// Limits the validator needs, snapshotted from configuration
#[derive(Debug, Clone)]
pub struct ValidationLimits {
    pub key_prefix: String,
    pub api_key_min_length: usize,
    pub max_message_length: usize,
}

impl ValidationLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            key_prefix: config.anthropic.key_prefix.clone(),
            api_key_min_length: config.security.api_key_min_length,
            max_message_length: config.validation.max_message_length,
        }
    }
}

/// Check the client-supplied API key
///
/// A key is valid iff it is at least `api_key_min_length` long and
/// starts with the configured prefix. Presence is checked first so a
/// missing key reports `API key required` rather than a format error.
///
/// # Errors
///
/// `ApiKeyMissing` for an empty key, `ApiKeyFormat` otherwise
pub fn validate_api_key(key: &SecretString, limits: &ValidationLimits) -> Result<(), RelayError> {
    let key = key.expose_secret();

    if key.is_empty() {
        return Err(RelayError::ApiKeyMissing);
    }

    if key.len() < limits.api_key_min_length || !key.starts_with(&limits.key_prefix) {
        return Err(RelayError::ApiKeyFormat);
    }

    Ok(())
}

/// Validate a parsed message request
///
/// # Errors
///
/// Returns the first failing check in documented order
pub fn validate_message_request(request: &MessageRequest, limits: &ValidationLimits) -> Result<(), RelayError> {
    if request.model.is_empty() {
        return Err(RelayError::ModelRequired);
    }

    if request.messages.is_empty() {
        return Err(RelayError::MessagesRequired);
    }

    if request
        .messages
        .iter()
        .any(|message| message.content.len() > limits.max_message_length)
    {
        return Err(RelayError::MessageTooLong {
            max: limits.max_message_length,
        });
    }

    if request.max_tokens <= 0 {
        return Err(RelayError::MaxTokensZero);
    }

    Ok(())
}
