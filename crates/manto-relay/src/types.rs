//! Wire types for the Anthropic Messages API
//!
//! Request types are parsed from the browser client and re-serialized
//! upstream; response types pass through verbatim.

use serde::{Deserialize, Serialize};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Inbound message-send request
///
/// `max_tokens`, `temperature`, and `system` are validated but then
/// replaced with server-side values before the upstream call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub max_tokens: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Upstream message response, forwarded to the caller unmodified
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub role: String,
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

/// One block of response content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Structured error object returned by the provider on non-2xx
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamErrorEnvelope {
    pub error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamErrorDetail {
    #[serde(rename = "type", default)]
    #[allow(dead_code)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}
