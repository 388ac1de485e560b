use serde::Deserialize;

/// Inbound request validation limits
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Maximum length of a single chat message, in characters
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
        }
    }
}

const fn default_max_message_length() -> usize {
    4000
}
